pub const USAGE: &str = "\
usage: scoreboard [--config=PATH] <command>

commands:
  games                                         list the game catalog
  login <username> <password>                   obtain an API token
  board <game> [--search=TERM] [--real-name=NAME]...
                                                print one ranked leaderboard
  live [--interval=SECS]                        follow every top 10 until Ctrl-C
  podium                                        top three per game, third place first
  score <game> <player> <value> [--nickname]    submit a score (m:ss for timed games)
  add-member <name> <department> [--nickname=NICK]
  delete-member <name>
  import <file.csv>                             check headers, then upload a roster";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Games,
    Login {
        username: String,
        password: String,
    },
    Board {
        game: String,
        search: Option<String>,
        real_names: Vec<String>,
    },
    Live {
        interval_secs: Option<u64>,
    },
    Podium,
    Score {
        game: String,
        player: String,
        value: String,
        by_nickname: bool,
    },
    AddMember {
        name: String,
        department: String,
        nickname: Option<String>,
    },
    DeleteMember {
        name: String,
    },
    Import {
        path: String,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<String>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingCommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    UnexpectedArgument(String),
    UnknownFlag(String),
    InvalidValue { flag: &'static str, value: String },
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "no command given"),
            Self::UnknownCommand(c) => write!(f, "unknown command '{c}'"),
            Self::MissingArgument(a) => write!(f, "missing argument <{a}>"),
            Self::UnexpectedArgument(a) => write!(f, "unexpected argument '{a}'"),
            Self::UnknownFlag(a) => write!(f, "unknown flag '{a}'"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value '{value}' for --{flag}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Split arguments into `--flag[=value]` pairs and positionals.
struct Parsed {
    positionals: std::vec::IntoIter<String>,
    flags: Vec<(String, Option<String>)>,
}

impl Parsed {
    fn new(args: Vec<String>) -> Self {
        let mut positionals = Vec::new();
        let mut flags = Vec::new();
        for arg in args {
            match arg.strip_prefix("--") {
                Some(flag) => match flag.split_once('=') {
                    Some((k, v)) => flags.push((k.to_string(), Some(v.to_string()))),
                    None => flags.push((flag.to_string(), None)),
                },
                None => positionals.push(arg),
            }
        }
        Self {
            positionals: positionals.into_iter(),
            flags,
        }
    }

    fn required(&mut self, name: &'static str) -> Result<String, ArgsError> {
        self.positionals
            .next()
            .ok_or(ArgsError::MissingArgument(name))
    }

    /// Remove and return every value given for `--name=VALUE`.
    fn values(&mut self, name: &'static str) -> Result<Vec<String>, ArgsError> {
        let mut values = Vec::new();
        let mut rest = Vec::new();
        for (k, v) in std::mem::take(&mut self.flags) {
            if k != name {
                rest.push((k, v));
                continue;
            }
            match v {
                Some(v) if !v.is_empty() => values.push(v),
                _ => {
                    return Err(ArgsError::InvalidValue {
                        flag: name,
                        value: v.unwrap_or_default(),
                    });
                },
            }
        }
        self.flags = rest;
        Ok(values)
    }

    fn value(&mut self, name: &'static str) -> Result<Option<String>, ArgsError> {
        Ok(self.values(name)?.pop())
    }

    /// Remove a bare `--name` switch.
    fn switch(&mut self, name: &str) -> bool {
        let before = self.flags.len();
        self.flags.retain(|(k, v)| !(k == name && v.is_none()));
        self.flags.len() != before
    }

    /// Fail on anything not consumed.
    fn finish(mut self) -> Result<(), ArgsError> {
        if let Some((k, _)) = self.flags.first() {
            return Err(ArgsError::UnknownFlag(format!("--{k}")));
        }
        match self.positionals.next() {
            Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
            None => Ok(()),
        }
    }
}

/// Parse the process arguments (without the program name).
pub fn parse<I>(args: I) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut p = Parsed::new(args.into_iter().collect());
    let config_path = p.value("config")?;

    if p.switch("help") {
        return Ok(Invocation {
            config_path,
            command: Command::Help,
        });
    }

    let name = p.positionals.next().ok_or(ArgsError::MissingCommand)?;
    let command = match name.as_str() {
        "games" => Command::Games,
        "help" => Command::Help,
        "podium" => Command::Podium,
        "login" => Command::Login {
            username: p.required("username")?,
            password: p.required("password")?,
        },
        "board" => Command::Board {
            game: p.required("game")?,
            search: p.value("search")?,
            real_names: p.values("real-name")?,
        },
        "live" => {
            let interval_secs = match p.value("interval")? {
                Some(v) => Some(v.parse::<u64>().map_err(|_| ArgsError::InvalidValue {
                    flag: "interval",
                    value: v,
                })?),
                None => None,
            };
            Command::Live { interval_secs }
        },
        "score" => Command::Score {
            game: p.required("game")?,
            player: p.required("player")?,
            value: p.required("value")?,
            by_nickname: p.switch("nickname"),
        },
        "add-member" => Command::AddMember {
            name: p.required("name")?,
            department: p.required("department")?,
            nickname: p.value("nickname")?,
        },
        "delete-member" => Command::DeleteMember {
            name: p.required("name")?,
        },
        "import" => Command::Import {
            path: p.required("file.csv")?,
        },
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };
    p.finish()?;

    Ok(Invocation {
        config_path,
        command,
    })
}
