// seeker_core/src/vision/mod.rs

//! The vision-service contract consumed by the core, plus the pieces needed
//! to stand in for that service: a geometric stereo camera model and the
//! command policies that turn a detection into a navigation command.

pub mod camera;
pub mod policy;
pub mod tracker;

use serde::{Deserialize, Serialize};

use crate::types::NavigationCommand;

pub use camera::StereoCameraModel;
pub use policy::{respond, BoundingBoxPolicy, NavigationPolicy, StereoPolicy};
pub use tracker::{RequestToken, VisionRequestTracker};

/// Response of the vision service, one per capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResponse {
    pub action: NavigationCommand,
    pub reasoning: String,
    pub target_visible: bool,
    #[serde(default)]
    pub confidence: f64,
    /// `[ymin, xmin, ymax, xmax]` on a 0-1000 scale; empty or absent when
    /// nothing was seen.
    #[serde(default)]
    pub bounding_box: Option<Vec<i32>>,
    /// Stereo distance to the target in metres.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Horizontal angle to the target in degrees, negative = left.
    #[serde(default)]
    pub angle: Option<f64>,
}

impl VisionResponse {
    /// What the caller uses when the service cannot be reached or answers
    /// with something unusable.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            action: NavigationCommand::Scan,
            reasoning: reason.into(),
            target_visible: false,
            confidence: 0.0,
            bounding_box: None,
            distance: None,
            angle: None,
        }
    }

    pub fn detection_box(&self) -> Option<BoundingBox> {
        self.bounding_box.as_deref().and_then(BoundingBox::from_wire)
    }
}

/// Axis-aligned image box on the service's 0-1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl BoundingBox {
    pub fn from_wire(raw: &[i32]) -> Option<Self> {
        match raw {
            [ymin, xmin, ymax, xmax] => Some(Self {
                ymin: *ymin as f64,
                xmin: *xmin as f64,
                ymax: *ymax as f64,
                xmax: *xmax as f64,
            }),
            _ => None,
        }
    }

    pub fn to_wire(&self) -> Vec<i32> {
        [self.ymin, self.xmin, self.ymax, self.xmax]
            .iter()
            .map(|v| v.round() as i32)
            .collect()
    }

    pub fn center_x(&self) -> f64 {
        (self.xmin + self.xmax) * 0.5
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// What one camera pair reports about the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub distance: Option<f64>,
    /// Degrees, negative = left in the image.
    pub angle: Option<f64>,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounding_box_means_no_detection() {
        let response = VisionResponse {
            bounding_box: Some(vec![]),
            ..VisionResponse::fallback("nothing")
        };
        assert!(response.detection_box().is_none());
    }

    #[test]
    fn fallback_scans() {
        let response = VisionResponse::fallback("service down");
        assert_eq!(response.action, NavigationCommand::Scan);
        assert!(!response.target_visible);
        assert_eq!(response.reasoning, "service down");
    }

    #[test]
    fn box_geometry() {
        let b = BoundingBox::from_wire(&[100, 400, 500, 600]).unwrap();
        assert_eq!(b.center_x(), 500.0);
        assert_eq!(b.height(), 400.0);
        assert_eq!(b.to_wire(), vec![100, 400, 500, 600]);
    }
}
