// output formatting for one-shot mode - readable trace or raw json

use crate::Error;
use crate::core::{Console, ControlResponse, Panel};

pub struct Output;

impl Output {
    // decision trace for humans
    pub fn pretty(console: &Console) {
        print!("{}", Self::render(console));
    }

    // raw json for scripts
    pub fn raw(response: &ControlResponse) -> Result<(), Error> {
        println!("{}", response.to_json()?);
        Ok(())
    }

    pub fn render(console: &Console) -> String {
        match console.panel() {
            Panel::Trace(trace) => trace.to_string(),
            Panel::Failed(message) => format!("error: {message}\n"),
            Panel::Busy => format!("{}\n", console.submit_label()),
            Panel::Empty => "no query submitted\n".to_string(),
        }
    }
}
