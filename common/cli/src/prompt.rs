use std::io::{self, Write};

/// Asks the operator a yes/no question before an action proceeds.
///
/// Actions take this as a parameter so tests can answer without a terminal.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Interactive confirmation on stdin. An empty reply or `y` accepts.
#[derive(Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        print!("{} [Y/n] ", question);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(matches!(input.trim().to_lowercase().as_str(), "" | "y"))
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod test {
    use super::Confirm;

    /// Scripted answers for tests; panics when asked more questions than scripted.
    pub struct ScriptedConfirm {
        answers: Vec<bool>,
        pub questions: Vec<String>,
    }

    impl ScriptedConfirm {
        pub fn new(answers: Vec<bool>) -> Self {
            Self {
                answers,
                questions: vec![],
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
            self.questions.push(question.to_string());
            Ok(self.answers.remove(0))
        }
    }
}
