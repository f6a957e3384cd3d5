mod bounding_box;
mod centroid;
mod face_frame;
mod is_valid;

pub use bounding_box::{Aabb, BoundingBox};
pub use centroid::RecenterToCentroid;
pub use face_frame::{aspect_ratio, local_frame, width_height, FaceFrame};
pub use is_valid::IsValid;
