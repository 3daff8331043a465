use super::args::*;

pub(crate) mod check;
pub(crate) mod gate_builder;
pub(crate) mod persona;

use crate::exit_codes::OK;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check::run(args).await,
        Command::Persona(args) => match args.cmd {
            PersonaSub::Show { config, name } => persona::show(&config, name.as_deref()).await,
        },
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(OK)
        }
    }
}
