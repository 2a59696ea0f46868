// seeker_core/src/vision/policy.rs

use dyn_clone::DynClone;
use std::fmt::Debug;

use super::{Detection, VisionResponse};
use crate::types::NavigationCommand;

/// Turns a detection into a navigation command and a human-readable reason.
pub trait NavigationPolicy: DynClone + Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn decide(&self, detection: &Detection) -> (NavigationCommand, String);
}

dyn_clone::clone_trait_object!(NavigationPolicy);

/// Builds the full service response for an optional detection.
pub fn respond(policy: &dyn NavigationPolicy, detection: Option<&Detection>) -> VisionResponse {
    match detection {
        Some(d) => {
            let (action, reasoning) = policy.decide(d);
            VisionResponse {
                action,
                reasoning,
                target_visible: true,
                confidence: d.confidence,
                bounding_box: Some(d.bounding_box.to_wire()),
                distance: d.distance,
                angle: d.angle,
            }
        }
        None => VisionResponse::fallback("Target not visible. Scanning..."),
    }
}

/// Depth-and-angle steering for a stereo pair.
#[derive(Debug, Clone)]
pub struct StereoPolicy {
    /// Full horizontal field of view in degrees.
    pub fov_deg: f64,
    /// Below this confidence the detection is ignored.
    pub min_confidence: f64,
}

impl Default for StereoPolicy {
    fn default() -> Self {
        Self {
            fov_deg: 110.0,
            min_confidence: 0.3,
        }
    }
}

impl NavigationPolicy for StereoPolicy {
    fn name(&self) -> &'static str {
        "Stereo"
    }

    fn decide(&self, d: &Detection) -> (NavigationCommand, String) {
        use NavigationCommand::*;

        let Some(distance) = d.distance else {
            return depthless(d);
        };
        let Some(angle) = d.angle else {
            return (Scan, "Target not detected or low confidence".to_string());
        };
        if d.confidence < self.min_confidence {
            return (Scan, "Target not detected or low confidence".to_string());
        }

        let a = (angle / (self.fov_deg * 0.5)).clamp(-1.0, 1.0);

        // (centred band, turn band) per distance bracket.
        let (centred, turn) = if distance < 1.0 {
            (0.1, 0.3)
        } else if distance < 5.0 {
            (0.2, 0.5)
        } else {
            (0.3, 0.7)
        };

        if distance < 1.0 && a.abs() < centred {
            return (
                Stop,
                format!("Target reached! Distance: {distance:.1}m, Angle: {angle:.1}°"),
            );
        }
        if a.abs() < centred {
            (
                Forward,
                format!("Target centred at {distance:.1}m, moving FORWARD"),
            )
        } else if a < -turn {
            (
                Left,
                format!("Target at {distance:.1}m, turning LEFT (angle: {angle:.1}°)"),
            )
        } else if a > turn {
            (
                Right,
                format!("Target at {distance:.1}m, turning RIGHT (angle: {angle:.1}°)"),
            )
        } else {
            (
                Forward,
                format!("Target at {distance:.1}m, moving FORWARD while centering"),
            )
        }
    }
}

/// Steering for a stereo detection whose depth estimate failed: column of
/// the box centre, with a tall box as the arrival cue.
fn depthless(d: &Detection) -> (NavigationCommand, String) {
    use NavigationCommand::*;

    let cx = d.bounding_box.center_x();
    if cx < 400.0 {
        (Left, format!("Target at X={cx:.0}, turning LEFT"))
    } else if cx > 600.0 {
        (Right, format!("Target at X={cx:.0}, turning RIGHT"))
    } else if d.bounding_box.height() < 800.0 {
        (Forward, format!("Target centred at X={cx:.0}, moving FORWARD"))
    } else {
        (Stop, format!("Target reached! Centred at X={cx:.0}"))
    }
}

/// Monocular steering from the bounding box alone. Box height stands in for
/// distance.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxPolicy;

impl NavigationPolicy for BoundingBoxPolicy {
    fn name(&self) -> &'static str {
        "BoundingBox"
    }

    fn decide(&self, d: &Detection) -> (NavigationCommand, String) {
        use NavigationCommand::*;

        let cx = d.bounding_box.center_x();
        let h = d.bounding_box.height();

        if h < 50.0 {
            return (
                Forward,
                format!("Target very far away (height={h:.0}). Moving forward"),
            );
        }

        // (left edge, right edge) of the centred band by apparent size.
        let (left, right) = if h < 150.0 {
            (50.0, 950.0)
        } else if h < 400.0 {
            (200.0, 800.0)
        } else {
            (300.0, 700.0)
        };

        if cx < left {
            (Left, format!("Target at X={cx:.0}. Turning LEFT (height={h:.0})"))
        } else if cx > right {
            (Right, format!("Target at X={cx:.0}. Turning RIGHT (height={h:.0})"))
        } else if h >= 800.0 {
            (
                Stop,
                format!("Target reached! Centred at X={cx:.0}, height={h:.0}"),
            )
        } else {
            (
                Forward,
                format!("Target visible at X={cx:.0}. Moving FORWARD (height={h:.0})"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::BoundingBox;

    fn stereo(distance: f64, angle: f64, confidence: f64) -> Detection {
        Detection {
            bounding_box: BoundingBox {
                ymin: 400.0,
                xmin: 450.0,
                ymax: 600.0,
                xmax: 550.0,
            },
            distance: Some(distance),
            angle: Some(angle),
            confidence,
        }
    }

    fn boxed(cx: f64, h: f64) -> Detection {
        Detection {
            bounding_box: BoundingBox {
                ymin: 500.0 - h / 2.0,
                xmin: cx - 10.0,
                ymax: 500.0 + h / 2.0,
                xmax: cx + 10.0,
            },
            distance: None,
            angle: None,
            confidence: 0.9,
        }
    }

    #[test]
    fn stereo_stops_when_close_and_centred() {
        let p = StereoPolicy::default();
        assert_eq!(p.decide(&stereo(0.8, 2.0, 0.9)).0, NavigationCommand::Stop);
        assert_eq!(p.decide(&stereo(0.8, -30.0, 0.9)).0, NavigationCommand::Left);
        assert_eq!(p.decide(&stereo(0.8, 10.0, 0.9)).0, NavigationCommand::Forward);
    }

    #[test]
    fn stereo_bands_widen_with_distance() {
        let p = StereoPolicy::default();
        // 33 deg is 0.6 of the half-FOV: a turn at medium range, not far away.
        assert_eq!(p.decide(&stereo(3.0, 33.0, 0.9)).0, NavigationCommand::Right);
        assert_eq!(p.decide(&stereo(8.0, 33.0, 0.9)).0, NavigationCommand::Forward);
        assert_eq!(p.decide(&stereo(8.0, -44.0, 0.9)).0, NavigationCommand::Left);
    }

    #[test]
    fn stereo_ignores_weak_detections() {
        let p = StereoPolicy::default();
        assert_eq!(p.decide(&stereo(3.0, 0.0, 0.2)).0, NavigationCommand::Scan);
        let mut d = stereo(3.0, 0.0, 0.9);
        d.angle = None;
        assert_eq!(p.decide(&d).0, NavigationCommand::Scan);
    }

    #[test]
    fn stereo_without_depth_steers_by_box_column() {
        let p = StereoPolicy::default();
        assert_eq!(p.decide(&boxed(350.0, 300.0)).0, NavigationCommand::Left);
        assert_eq!(p.decide(&boxed(650.0, 300.0)).0, NavigationCommand::Right);
        assert_eq!(p.decide(&boxed(420.0, 500.0)).0, NavigationCommand::Forward);
        assert_eq!(p.decide(&boxed(500.0, 850.0)).0, NavigationCommand::Stop);
    }

    #[test]
    fn bounding_box_policy_follows_apparent_size() {
        let p = BoundingBoxPolicy;
        assert_eq!(p.decide(&boxed(20.0, 30.0)).0, NavigationCommand::Forward);
        assert_eq!(p.decide(&boxed(30.0, 100.0)).0, NavigationCommand::Left);
        assert_eq!(p.decide(&boxed(850.0, 300.0)).0, NavigationCommand::Right);
        assert_eq!(p.decide(&boxed(500.0, 850.0)).0, NavigationCommand::Stop);
        assert_eq!(p.decide(&boxed(500.0, 600.0)).0, NavigationCommand::Forward);
    }

    #[test]
    fn respond_without_detection_scans() {
        let r = respond(&StereoPolicy::default(), None);
        assert_eq!(r.action, NavigationCommand::Scan);
        assert!(!r.target_visible);
    }

    #[test]
    fn boxed_policies_clone() {
        let policy: Box<dyn NavigationPolicy> = Box::new(BoundingBoxPolicy);
        let copy = policy.clone();
        assert_eq!(copy.name(), "BoundingBox");
    }
}
