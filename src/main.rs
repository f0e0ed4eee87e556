use clap::FromArgMatches;
use mzt::cli::commands::execute_command;
use mzt::cli::{build_command, Cli};
use mzt::logging::{self, LogConfig};

fn main() {
    let cli = match build_command()
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        // --help and --version arrive here too and exit 0
        Err(e) => e.exit(),
    };

    let log_config = LogConfig { debug: cli.debug };
    let result = logging::init(&log_config).and_then(|()| execute_command(&cli));

    if let Err(e) = result {
        e.show(None);
        std::process::exit(e.exit_code());
    }
}
