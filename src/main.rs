//////////////////////////////////////////////////
// Using

use std::process::ExitCode;

use square_gl::prelude::*;

//////////////////////////////////////////////////
// Entry point for desktop

pub fn main() -> ExitCode {
    // overrides are read before logging exists, report them directly
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };
    let renderer = SquareRenderer::new(&config);

    let game = Game::new(config, renderer).with_logging();
    log::debug!("{:?}", game.config());

    match game.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Render loop stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
