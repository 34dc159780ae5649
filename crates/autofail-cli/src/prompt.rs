// Interactive decider: prints each proposal and reads y/n/c answers.

use std::io::{BufRead, Write};

use autofail_fix::{Decision, FixDecider, FixProposal};
use log::warn;

const QUESTION: &str = "Accept this solution? [y]es / [n]ext / [c]ancel: ";

pub struct PromptDecider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptDecider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, proposal: &FixProposal) -> std::io::Result<Decision> {
        writeln!(self.output, "{proposal}")?;
        loop {
            write!(self.output, "{QUESTION}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Decision::Abort);
            }
            match parse_answer(&line) {
                Some(decision) => return Ok(decision),
                None => writeln!(self.output, "Please answer y, n or c.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> FixDecider for PromptDecider<R, W> {
    fn decide(&mut self, proposal: &FixProposal) -> Decision {
        self.ask(proposal).unwrap_or_else(|e| {
            warn!("prompt failed: {e}");
            Decision::Abort
        })
    }
}

fn parse_answer(line: &str) -> Option<Decision> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(Decision::Accept),
        "n" | "no" | "next" => Some(Decision::Reject),
        "c" | "cancel" | "q" | "quit" => Some(Decision::Abort),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofail_fix::{FixGuide, PaddingSolution};

    fn proposal() -> FixProposal {
        let solution = PaddingSolution::new(vec![4]);
        FixProposal {
            number: 2,
            guide: FixGuide::new(&[], &Default::default(), &solution),
            solution,
        }
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("Y\n"), Some(Decision::Accept));
        assert_eq!(parse_answer(" next "), Some(Decision::Reject));
        assert_eq!(parse_answer("c"), Some(Decision::Abort));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn test_reprompts_on_bad_answer() {
        let mut output = Vec::new();
        let decision = PromptDecider::new(&b"what\nn\n"[..], &mut output).decide(&proposal());
        assert_eq!(decision, Decision::Reject);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Solution 2\n"));
        assert!(text.contains("Extra objects after 0: 4"));
        assert_eq!(text.matches(QUESTION).count(), 2);
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut output = Vec::new();
        let decision = PromptDecider::new(&b""[..], &mut output).decide(&proposal());
        assert_eq!(decision, Decision::Abort);
    }
}
