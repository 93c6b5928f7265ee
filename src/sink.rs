use crate::{error::Error, profile::ExerciseKind, session::SessionResult};
use std::io::Write;
use tracing::info;

pub trait FeedbackSink {
    fn feedback_raised(&mut self, exercise: ExerciseKind, message: &str);
}

pub trait ResultSink {
    fn submit(&mut self, result: &SessionResult) -> Result<(), Error>;
}

#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn feedback_raised(&mut self, exercise: ExerciseKind, message: &str) {
        info!(message = "feedback", %exercise, text = message);
    }
}

pub struct JsonResultSink<W> {
    writer: W,
}

impl<W> JsonResultSink<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> ResultSink for JsonResultSink<W>
where
    W: Write,
{
    fn submit(&mut self, result: &SessionResult) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, result).map_err(Error::SerializeResult)?;
        writeln!(self.writer).map_err(Error::WriteResult)?;
        self.writer.flush().map_err(Error::WriteResult)
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonResultSink, ResultSink};
    use crate::{profile::ExerciseKind, session::SessionResult};

    #[test]
    fn result_is_one_camel_case_line() {
        let mut sink = JsonResultSink::new(Vec::new());
        sink.submit(&SessionResult {
            exercise_type: ExerciseKind::BicepCurl,
            count: 30,
            accuracy: 0.75,
        })
        .unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            written,
            "{\"exerciseType\":\"bicep_curl\",\"count\":30,\"accuracy\":0.75}\n"
        );
    }
}
