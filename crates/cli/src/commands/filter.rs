use std::path::Path;

use crate::commands::{load_service, read_input, CommandResult};

const COMMAND: &str = "filter";

pub fn run(input: &Path, preferences: &[String]) -> CommandResult {
    let service = match load_service(COMMAND) {
        Ok(service) => service,
        Err(result) => return result,
    };
    let file = match read_input(COMMAND, input) {
        Ok(file) => file,
        Err(result) => return result,
    };

    let outcome = service.filter_recommendations(&file.recommendations, preferences);
    CommandResult::data(COMMAND, &outcome)
}
