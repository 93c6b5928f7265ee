use crate::{engine::Input, error::Error, pose::Pose, profile::ExerciseKind};
use serde::Deserialize;
use std::io::BufRead;

#[derive(Debug, Deserialize)]
struct KeypointRecord {
    x: f32,
    y: f32,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Record {
    Switch {
        switch: ExerciseKind,
    },
    Pose {
        score: f32,
        keypoints: Vec<KeypointRecord>,
    },
}

/// Parse one line of a frame log. Blank lines yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Input>, Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let record: Record =
        serde_json::from_str(line).map_err(|e| Error::ParseFrame(e, line_no))?;
    let input = match record {
        Record::Switch { switch } => Input::Switch(switch),
        Record::Pose { score, keypoints } => {
            let triples = keypoints
                .iter()
                .map(|k| (k.x, k.y, k.score))
                .collect::<Vec<_>>();
            Input::Frame(Box::new(Pose::from_triples(&triples, score)?))
        }
    };
    Ok(Some(input))
}

pub fn inputs<R>(reader: R) -> impl Iterator<Item = Result<Input, Error>>
where
    R: BufRead,
{
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) => parse_line(&line, i + 1).transpose(),
            Err(e) => Some(Err(Error::ReadFrames(e))),
        })
}

#[cfg(test)]
mod tests {
    use super::{inputs, parse_line};
    use crate::{
        engine::Input,
        error::Error,
        pose::{LandmarkKind, NUM_LANDMARKS},
        profile::ExerciseKind,
    };
    use assert_approx_eq::assert_approx_eq;

    fn pose_line(score: f32, n: usize) -> String {
        let keypoints = (0..n)
            .map(|i| format!("{{\"x\":{},\"y\":0.5,\"score\":0.8}}", i as f32 / 100.0))
            .collect::<Vec<_>>()
            .join(",");
        format!("{{\"score\":{},\"keypoints\":[{}]}}", score, keypoints)
    }

    #[test]
    fn pose_record() {
        let input = parse_line(&pose_line(0.7, NUM_LANDMARKS), 1).unwrap();
        match input {
            Some(Input::Frame(pose)) => {
                assert_approx_eq!(pose.score, 0.7);
                let knee = pose[LandmarkKind::LeftKnee];
                assert_eq!(knee.kind, LandmarkKind::LeftKnee);
                assert_approx_eq!(knee.point.x(), 0.25);
                assert_approx_eq!(knee.score, 0.8);
            }
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn switch_record_accepts_aliases() {
        assert!(matches!(
            parse_line("{\"switch\":\"pushup\"}", 1).unwrap(),
            Some(Input::Switch(ExerciseKind::PushUp))
        ));
        assert!(matches!(
            parse_line(" {\"switch\": \"bicep_curl\"} ", 1).unwrap(),
            Some(Input::Switch(ExerciseKind::BicepCurl))
        ));
    }

    #[test]
    fn wrong_keypoint_count() {
        assert!(matches!(
            parse_line(&pose_line(0.7, 17), 3),
            Err(Error::LandmarkCount(33, 17))
        ));
    }

    #[test]
    fn out_of_range_pose_score() {
        assert!(matches!(
            parse_line(&pose_line(1.5, NUM_LANDMARKS), 1),
            Err(Error::ScoreOutOfRange(_))
        ));
    }

    #[test]
    fn bad_lines_report_their_number() {
        let log = format!("{}\n\n{{\"switch\":\"lunge\"}}\n", pose_line(0.9, NUM_LANDMARKS));
        let parsed = inputs(log.as_bytes()).collect::<Vec<_>>();
        assert_eq!(parsed.len(), 2);
        assert!(matches!(parsed[0], Ok(Input::Frame(_))));
        assert!(matches!(parsed[1], Err(Error::ParseFrame(_, 3))));
    }
}
