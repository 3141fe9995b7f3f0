//! Command-line parsing for `base-ex`.
//!
//! Hand-rolled: `CONVERTER` and `FILE` positionals, bundled short flags,
//! `-wN` / `-w N` / `--wrap=N` / `--wrap N`.

use baseex_core::codecs::OutputCase;
use baseex_core::constants::DEFAULT_WRAP;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub converter: Option<String>,
    pub decode: bool,
    pub ignore_garbage: bool,
    pub case: OutputCase,
    pub wrap: usize,
    /// `None` or `-` reads standard input.
    pub file: Option<String>,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            converter: None,
            decode: false,
            ignore_garbage: false,
            case: OutputCase::Default,
            wrap: DEFAULT_WRAP,
            file: None,
        }
    }
}

impl Cli {
    /// Path to read, `None` for standard input.
    pub fn input_path(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| *f != "-")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Cli),
    Help,
    Version,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("invalid wrap size: '{0}'")]
    InvalidWrap(String),

    #[error("option '{0}' requires an argument")]
    MissingValue(String),

    #[error("unrecognized option '{0}'")]
    UnknownLong(String),

    #[error("invalid option -- '{0}'")]
    UnknownShort(char),

    #[error("extra operand '{0}'")]
    ExtraOperand(String),
}

fn parse_wrap(value: &str) -> Result<usize, ArgError> {
    value.parse().map_err(|_| ArgError::InvalidWrap(value.to_string()))
}

pub fn parse_args<I>(args: I) -> Result<Command, ArgError>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = Cli::default();
    let mut args = args.into_iter();
    let mut only_operands = false;

    while let Some(arg) = args.next() {
        if only_operands || arg == "-" || !arg.starts_with('-') {
            push_operand(&mut cli, arg)?;
            continue;
        }
        if arg == "--" {
            only_operands = true;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if let Some(value) = long.strip_prefix("wrap=") {
                cli.wrap = parse_wrap(value)?;
                continue;
            }
            match long {
                "decode" => cli.decode = true,
                "ignore-garbage" => cli.ignore_garbage = true,
                "upper" => cli.case = OutputCase::Upper,
                "lower" => cli.case = OutputCase::Lower,
                "wrap" => {
                    let value = args.next().ok_or_else(|| ArgError::MissingValue("--wrap".into()))?;
                    cli.wrap = parse_wrap(&value)?;
                }
                "help" => return Ok(Command::Help),
                "version" => return Ok(Command::Version),
                _ => return Err(ArgError::UnknownLong(arg)),
            }
            continue;
        }

        let flags = &arg[1..];
        for (i, flag) in flags.char_indices() {
            match flag {
                'd' => cli.decode = true,
                'i' => cli.ignore_garbage = true,
                'u' => cli.case = OutputCase::Upper,
                'l' => cli.case = OutputCase::Lower,
                'h' => return Ok(Command::Help),
                'V' => return Ok(Command::Version),
                'w' => {
                    let inline = &flags[i + 1..];
                    cli.wrap = if inline.is_empty() {
                        let value = args.next().ok_or_else(|| ArgError::MissingValue("-w".into()))?;
                        parse_wrap(&value)?
                    } else {
                        parse_wrap(inline)?
                    };
                    break;
                }
                other => return Err(ArgError::UnknownShort(other)),
            }
        }
    }

    Ok(Command::Run(cli))
}

fn push_operand(cli: &mut Cli, arg: String) -> Result<(), ArgError> {
    if cli.converter.is_none() {
        cli.converter = Some(arg);
    } else if cli.file.is_none() {
        cli.file = Some(arg);
    } else {
        return Err(ArgError::ExtraOperand(arg));
    }
    Ok(())
}
