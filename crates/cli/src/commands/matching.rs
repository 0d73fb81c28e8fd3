use std::path::Path;

use crate::commands::{load_service, read_input, runtime, CommandResult};

const COMMAND: &str = "match";

/// Matches every recommendation in `input` against the configured catalog. A
/// `--budget` flag takes precedence over a budget embedded in the file.
pub fn run(input: &Path, budget: Option<f64>) -> CommandResult {
    let service = match load_service(COMMAND) {
        Ok(service) => service,
        Err(result) => return result,
    };
    let file = match read_input(COMMAND, input) {
        Ok(file) => file,
        Err(result) => return result,
    };
    let runtime = match runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let budget = budget.or(file.budget);
    match runtime.block_on(service.match_recommendations(file.recommendations, budget)) {
        Ok(matches) => CommandResult::data(COMMAND, &matches),
        Err(error) => CommandResult::failure(COMMAND, "invalid_input", error.to_string(), 1),
    }
}
