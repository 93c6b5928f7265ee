pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod pose;
pub mod profile;
pub mod replay;
pub mod schedule;
pub mod select;
pub mod session;
pub mod sink;

pub use config::SessionConfig;
pub use engine::{Engine, Input, RestTimer, ThreadTimer};
pub use error::Error;
pub use event::Event;
pub use pose::{Landmark, LandmarkKind, Point, Pose};
pub use profile::{ExerciseKind, FormError, Stage};
pub use session::{Session, SessionResult, Snapshot};
