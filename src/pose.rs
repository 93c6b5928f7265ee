use crate::error::Error;
use num_traits::FromPrimitive;
use ordered_float::NotNan;
use std::ops::{Index, Sub};

/// Anatomical landmark ids in the 33-point BlazePose numbering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

pub const NUM_LANDMARKS: usize = 33;

impl LandmarkKind {
    pub fn from_index(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToLandmarkKind(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: NotNan::new(x)
                .map_err(|e| Error::ConstructNotNan(e, x))?
                .into_inner(),
            y: NotNan::new(y)
                .map_err(|e| Error::ConstructNotNan(e, y))?
                .into_inner(),
        })
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub point: Point,
    pub score: f32,
}

pub type Landmarks = [Landmark; NUM_LANDMARKS];

fn checked_score(score: f32) -> Result<f32, Error> {
    let score = NotNan::new(score)
        .map_err(|e| Error::ConstructNotNan(e, score))?
        .into_inner();
    if (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(Error::ScoreOutOfRange(score))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Pose {
    landmarks: Landmarks,
    pub score: f32,
}

impl Pose {
    pub fn from_triples(triples: &[(f32, f32, f32)], score: f32) -> Result<Self, Error> {
        if triples.len() != NUM_LANDMARKS {
            return Err(Error::LandmarkCount(NUM_LANDMARKS, triples.len()));
        }
        let score = checked_score(score)?;

        let mut landmarks = [Landmark {
            kind: LandmarkKind::Nose,
            point: Point::default(),
            score: 0.0,
        }; NUM_LANDMARKS];

        for (i, &(x, y, landmark_score)) in triples.iter().enumerate() {
            landmarks[i] = Landmark {
                kind: LandmarkKind::from_index(i)?,
                point: Point::new(x, y)?,
                score: checked_score(landmark_score)?,
            };
        }

        Ok(Self { landmarks, score })
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }
}

impl Index<LandmarkKind> for Pose {
    type Output = Landmark;

    fn index(&self, kind: LandmarkKind) -> &Self::Output {
        &self.landmarks[kind as usize]
    }
}
