use crate::pose::{Landmark, LandmarkKind, Point, Pose};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Ear,
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

impl Role {
    pub fn landmark(self, side: Side) -> LandmarkKind {
        use LandmarkKind::*;

        match (self, side) {
            (Role::Ear, Side::Left) => LeftEar,
            (Role::Ear, Side::Right) => RightEar,
            (Role::Shoulder, Side::Left) => LeftShoulder,
            (Role::Shoulder, Side::Right) => RightShoulder,
            (Role::Elbow, Side::Left) => LeftElbow,
            (Role::Elbow, Side::Right) => RightElbow,
            (Role::Wrist, Side::Left) => LeftWrist,
            (Role::Wrist, Side::Right) => RightWrist,
            (Role::Hip, Side::Left) => LeftHip,
            (Role::Hip, Side::Right) => RightHip,
            (Role::Knee, Side::Left) => LeftKnee,
            (Role::Knee, Side::Right) => RightKnee,
            (Role::Ankle, Side::Left) => LeftAnkle,
            (Role::Ankle, Side::Right) => RightAnkle,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Selection<'a> {
    pose: &'a Pose,
    pub side: Side,
}

impl<'a> Selection<'a> {
    pub fn landmark(&self, role: Role) -> &'a Landmark {
        let pose: &'a Pose = self.pose;
        &pose[role.landmark(self.side)]
    }

    pub fn point(&self, role: Role) -> Point {
        self.landmark(role).point
    }

    pub fn confident(&self, roles: &[Role], min_part_confidence: f32) -> bool {
        roles
            .iter()
            .all(|&role| self.landmark(role).score >= min_part_confidence)
    }
}

/// Picks the body side facing the camera from ear visibility. Ties go right;
/// a positive margin keeps the previous side until the other ear wins by more.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSelector {
    hysteresis: f32,
    current: Option<Side>,
}

impl LandmarkSelector {
    pub fn new(hysteresis: f32) -> Self {
        Self {
            hysteresis,
            current: None,
        }
    }

    pub fn select<'a>(&mut self, pose: &'a Pose) -> Selection<'a> {
        let left = pose[LandmarkKind::LeftEar].score;
        let right = pose[LandmarkKind::RightEar].score;

        let side = match self.current {
            Some(current) if self.hysteresis > 0.0 => {
                let (mine, other) = match current {
                    Side::Left => (left, right),
                    Side::Right => (right, left),
                };
                if other > mine + self.hysteresis {
                    match current {
                        Side::Left => Side::Right,
                        Side::Right => Side::Left,
                    }
                } else {
                    current
                }
            }
            _ => {
                if left > right {
                    Side::Left
                } else {
                    Side::Right
                }
            }
        };

        if self.current != Some(side) {
            tracing::trace!(message = "selected body side", ?side, left, right);
        }
        self.current = Some(side);

        Selection { pose, side }
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
