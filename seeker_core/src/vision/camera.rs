// seeker_core/src/vision/camera.rs

//! Geometric stand-in for a stereo camera pair.
//!
//! Projects a spherical target into a square 0-1000 image with a pinhole
//! model. The rear pair produces a mirrored image, the way a rear-view mirror
//! does, which is why commands derived from it have LEFT and RIGHT swapped.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::{BoundingBox, Detection};
use crate::maze::MazeLayout;
use crate::types::{heading_towards, AgentPose};
use crate::utils::angles::shortest_angle;
use crate::view::CameraPair;

const IMAGE_SCALE: f64 = 1000.0;
const IMAGE_CENTER: f64 = IMAGE_SCALE / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StereoCameraModel {
    /// Full horizontal (and vertical) field of view in degrees.
    pub fov_deg: f64,
    /// Targets further than this are not resolved.
    pub max_range: f64,
}

impl Default for StereoCameraModel {
    fn default() -> Self {
        Self {
            fov_deg: 110.0,
            max_range: 30.0,
        }
    }
}

impl StereoCameraModel {
    fn half_fov(&self) -> f64 {
        self.fov_deg.to_radians() * 0.5
    }

    fn focal(&self) -> f64 {
        IMAGE_CENTER / self.half_fov().tan()
    }

    /// What `pair` sees of a target of `radius` centred at `target`, if
    /// anything.
    pub fn observe(
        &self,
        pose: &AgentPose,
        pair: CameraPair,
        target: &Point2<f64>,
        radius: f64,
        layout: &MazeLayout,
    ) -> Option<Detection> {
        let eye = pose.ground();
        let offset: Vector2<f64> = target - eye;
        let range = offset.norm();
        if range > self.max_range || occluded(&eye, target, layout) {
            return None;
        }

        let facing = match pair {
            CameraPair::Front => pose.heading,
            CameraPair::Rear => pose.heading + PI,
        };
        // Positive = target to the camera's left.
        let relative = if range > f64::EPSILON {
            shortest_angle(facing, heading_towards(&offset))
        } else {
            0.0
        };
        if relative.abs() > self.half_fov() {
            return None;
        }

        // Image angle, negative = left; the rear image is mirrored.
        let image_angle = match pair {
            CameraPair::Front => -relative,
            CameraPair::Rear => relative,
        };

        let bounding_box = self.project(image_angle, range.max(radius), radius);
        let confidence = confidence(&bounding_box);

        Some(Detection {
            bounding_box,
            distance: Some((range - radius).max(0.0)),
            angle: Some(image_angle.to_degrees()),
            confidence,
        })
    }

    fn project(&self, angle: f64, range: f64, radius: f64) -> BoundingBox {
        let f = self.focal();
        let spread = (radius / range).atan();
        let column = |a: f64| {
            let a = a.clamp(-self.half_fov(), self.half_fov());
            (IMAGE_CENTER + f * a.tan()).clamp(0.0, IMAGE_SCALE)
        };
        let half_height = (f * radius / range).min(IMAGE_CENTER);

        BoundingBox {
            ymin: IMAGE_CENTER - half_height,
            xmin: column(angle - spread),
            ymax: IMAGE_CENTER + half_height,
            xmax: column(angle + spread),
        }
    }
}

/// Larger and more central boxes are more trustworthy.
fn confidence(b: &BoundingBox) -> f64 {
    let area = (b.xmax - b.xmin) * (b.ymax - b.ymin) / (IMAGE_SCALE * IMAGE_SCALE);
    let centering = 1.0 - (b.center_x() - IMAGE_CENTER).abs() / IMAGE_CENTER;
    (0.6 * (area * 10.0).min(1.0) + 0.4 * centering).clamp(0.0, 1.0)
}

/// Whether the solid part of the divider blocks the line of sight.
fn occluded(from: &Point2<f64>, to: &Point2<f64>, layout: &MazeLayout) -> bool {
    if from.y * to.y >= 0.0 {
        return false;
    }
    let t = from.y / (from.y - to.y);
    let x = from.x + t * (to.x - from.x);
    !layout.in_gap_band(x)
}
