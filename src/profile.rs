use crate::{
    error::Error,
    geometry,
    select::{Role, Selection},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Bound, RangeBounds},
    str::FromStr,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    #[serde(alias = "pushup")]
    PushUp,
    #[serde(alias = "bicep-curl")]
    BicepCurl,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Squat,
        ExerciseKind::PushUp,
        ExerciseKind::BicepCurl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::PushUp => "push_up",
            ExerciseKind::BicepCurl => "bicep_curl",
        }
    }

    pub fn profile(self) -> &'static ExerciseProfile {
        match self {
            ExerciseKind::Squat => &SQUAT,
            ExerciseKind::PushUp => &PUSH_UP,
            ExerciseKind::BicepCurl => &BICEP_CURL,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "squat" => Ok(ExerciseKind::Squat),
            "push_up" | "pushup" | "push-up" => Ok(ExerciseKind::PushUp),
            "bicep_curl" | "bicep-curl" => Ok(ExerciseKind::BicepCurl),
            other => Err(Error::UnknownExercise(other.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Unknown,
    S1,
    S2,
    S3,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Unknown
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AngleSpec {
    Joint { vertex: Role, a: Role, b: Role },
    Inclination { from: Role, to: Role },
}

impl AngleSpec {
    pub fn measure(&self, selection: &Selection<'_>) -> f32 {
        match *self {
            AngleSpec::Joint { vertex, a, b } => geometry::joint_angle(
                selection.point(vertex),
                selection.point(a),
                selection.point(b),
            ),
            AngleSpec::Inclination { from, to } => {
                geometry::inclination(selection.point(from), selection.point(to))
            }
        }
    }
}

/// Strict comparison against a threshold in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Comparison {
    Above(f32),
    Below(f32),
}

impl Comparison {
    pub fn holds(self, value: f32) -> bool {
        match self {
            Comparison::Above(threshold) => value > threshold,
            Comparison::Below(threshold) => value < threshold,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Condition {
    pub angle: AngleSpec,
    pub comparison: Comparison,
}

impl Condition {
    pub fn holds(&self, selection: &Selection<'_>) -> bool {
        self.comparison.holds(self.angle.measure(selection))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StageBand {
    pub stage: Stage,
    pub lower: Bound<f32>,
    pub upper: Bound<f32>,
}

impl StageBand {
    pub fn contains(&self, angle: f32) -> bool {
        (self.lower, self.upper).contains(&angle)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormError {
    SquatTooDeep,
    KneeOverToe,
    HipSag,
    UpperArmDrift,
}

impl FormError {
    pub fn message(self) -> &'static str {
        match self {
            FormError::SquatTooDeep => "squatting too deep",
            FormError::KneeOverToe => "knee is past the toes",
            FormError::HipSag => "watch your lower-body posture",
            FormError::UpperArmDrift => "watch your upper-arm position",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FormCheck {
    pub error: FormError,
    pub roles: &'static [Role],
    pub condition: Condition,
    pub after_ready: bool,
}

#[derive(Debug, PartialEq)]
pub struct ExerciseProfile {
    pub kind: ExerciseKind,
    pub roles: &'static [Role],
    pub stage_angle: AngleSpec,
    /// Checked in order; the first band containing the angle wins.
    pub bands: [StageBand; 3],
    pub readiness: &'static [Condition],
    pub checks: &'static [FormCheck],
}

impl ExerciseProfile {
    pub fn classify(&self, angle: f32) -> Option<Stage> {
        self.bands
            .iter()
            .find(|band| band.contains(angle))
            .map(|band| band.stage)
    }

    pub fn has_readiness_gate(&self) -> bool {
        !self.readiness.is_empty()
    }

    pub fn is_ready(&self, selection: &Selection<'_>) -> bool {
        self.readiness
            .iter()
            .all(|condition| condition.holds(selection))
    }
}

const SQUAT_ROLES: &[Role] = &[Role::Hip, Role::Knee];
const PUSH_UP_ROLES: &[Role] = &[Role::Wrist, Role::Elbow, Role::Shoulder, Role::Hip, Role::Knee];
const CURL_ROLES: &[Role] = &[Role::Wrist, Role::Elbow, Role::Shoulder];

const KNEE_ANGLE: AngleSpec = AngleSpec::Inclination {
    from: Role::Hip,
    to: Role::Knee,
};
const SHIN_ANGLE: AngleSpec = AngleSpec::Inclination {
    from: Role::Knee,
    to: Role::Ankle,
};
const UPPER_ARM_ANGLE: AngleSpec = AngleSpec::Inclination {
    from: Role::Shoulder,
    to: Role::Elbow,
};
const ARM_ANGLE: AngleSpec = AngleSpec::Joint {
    vertex: Role::Elbow,
    a: Role::Wrist,
    b: Role::Shoulder,
};
const SHOULDER_ANGLE: AngleSpec = AngleSpec::Joint {
    vertex: Role::Shoulder,
    a: Role::Elbow,
    b: Role::Hip,
};
const HIP_ANGLE: AngleSpec = AngleSpec::Joint {
    vertex: Role::Hip,
    a: Role::Shoulder,
    b: Role::Knee,
};

pub static SQUAT: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::Squat,
    roles: SQUAT_ROLES,
    stage_angle: KNEE_ANGLE,
    bands: [
        StageBand {
            stage: Stage::S1,
            lower: Bound::Unbounded,
            upper: Bound::Included(32.0),
        },
        StageBand {
            stage: Stage::S2,
            lower: Bound::Included(35.0),
            upper: Bound::Included(65.0),
        },
        StageBand {
            stage: Stage::S3,
            lower: Bound::Included(75.0),
            upper: Bound::Unbounded,
        },
    ],
    readiness: &[],
    checks: &[
        FormCheck {
            error: FormError::SquatTooDeep,
            roles: SQUAT_ROLES,
            condition: Condition {
                angle: KNEE_ANGLE,
                comparison: Comparison::Above(105.0),
            },
            after_ready: false,
        },
        FormCheck {
            error: FormError::KneeOverToe,
            roles: &[Role::Knee, Role::Ankle],
            condition: Condition {
                angle: SHIN_ANGLE,
                comparison: Comparison::Above(30.0),
            },
            after_ready: false,
        },
    ],
};

pub static PUSH_UP: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::PushUp,
    roles: PUSH_UP_ROLES,
    stage_angle: ARM_ANGLE,
    bands: [
        StageBand {
            stage: Stage::S1,
            lower: Bound::Excluded(160.0),
            upper: Bound::Unbounded,
        },
        StageBand {
            stage: Stage::S2,
            lower: Bound::Excluded(100.0),
            upper: Bound::Included(145.0),
        },
        StageBand {
            stage: Stage::S3,
            lower: Bound::Unbounded,
            upper: Bound::Included(90.0),
        },
    ],
    readiness: &[
        Condition {
            angle: ARM_ANGLE,
            comparison: Comparison::Above(160.0),
        },
        Condition {
            angle: SHOULDER_ANGLE,
            comparison: Comparison::Above(40.0),
        },
        Condition {
            angle: HIP_ANGLE,
            comparison: Comparison::Above(165.0),
        },
    ],
    checks: &[FormCheck {
        error: FormError::HipSag,
        roles: PUSH_UP_ROLES,
        condition: Condition {
            angle: HIP_ANGLE,
            comparison: Comparison::Below(160.0),
        },
        after_ready: true,
    }],
};

// The S2 and S3 bands overlap on (55, 65); band order makes S2 win there.
pub static BICEP_CURL: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::BicepCurl,
    roles: CURL_ROLES,
    stage_angle: ARM_ANGLE,
    bands: [
        StageBand {
            stage: Stage::S1,
            lower: Bound::Included(140.0),
            upper: Bound::Unbounded,
        },
        StageBand {
            stage: Stage::S2,
            lower: Bound::Excluded(55.0),
            upper: Bound::Included(130.0),
        },
        StageBand {
            stage: Stage::S3,
            lower: Bound::Unbounded,
            upper: Bound::Excluded(65.0),
        },
    ],
    readiness: &[],
    checks: &[FormCheck {
        error: FormError::UpperArmDrift,
        roles: &[Role::Shoulder, Role::Elbow],
        condition: Condition {
            angle: UPPER_ARM_ANGLE,
            comparison: Comparison::Above(40.0),
        },
        after_ready: false,
    }],
};
