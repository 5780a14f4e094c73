use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use generation::{CurrentBlueprint, GenerateCityEvent, GenerationPlugin};

mod cli;

use cli::{parse_args, CliError};

/// Frames needed for a request to be accepted and then run.
const GENERATION_FRAMES: usize = 2;

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(CliError::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("cityforge: {e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    // Validate up front so a bad config is reported here rather than
    // dropped with a warning inside the app.
    if let Err(e) = args.config.validate() {
        eprintln!("cityforge: {e}");
        return ExitCode::from(2);
    }

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), GenerationPlugin));
    app.world_mut().send_event(GenerateCityEvent {
        config: args.config,
    });
    for _ in 0..GENERATION_FRAMES {
        app.update();
    }

    let Some(blueprint) = app
        .world_mut()
        .resource_mut::<CurrentBlueprint>()
        .0
        .take()
    else {
        eprintln!("cityforge: generation did not produce a city");
        return ExitCode::FAILURE;
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&blueprint)
    } else {
        serde_json::to_string(&blueprint)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("cityforge: cannot encode blueprint: {e}");
            ExitCode::FAILURE
        }
    }
}
