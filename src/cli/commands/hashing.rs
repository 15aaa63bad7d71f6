use clap::{Arg, ArgMatches, Command};

pub const ARG_ARGON2_MEMORY_KIB: &str = "argon2-memory-kib";
pub const ARG_ARGON2_ITERATIONS: &str = "argon2-iterations";
pub const ARG_ARGON2_PARALLELISM: &str = "argon2-parallelism";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            memory_kib: matches
                .get_one::<u32>(ARG_ARGON2_MEMORY_KIB)
                .copied()
                .unwrap_or(defaults.memory_kib),
            iterations: matches
                .get_one::<u32>(ARG_ARGON2_ITERATIONS)
                .copied()
                .unwrap_or(defaults.iterations),
            parallelism: matches
                .get_one::<u32>(ARG_ARGON2_PARALLELISM)
                .copied()
                .unwrap_or(defaults.parallelism),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ARGON2_MEMORY_KIB)
                .long(ARG_ARGON2_MEMORY_KIB)
                .help("Argon2id memory cost in KiB")
                .env("TESSERA_ARGON2_MEMORY_KIB")
                .default_value("19456")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_ARGON2_ITERATIONS)
                .long(ARG_ARGON2_ITERATIONS)
                .help("Argon2id time cost (passes)")
                .env("TESSERA_ARGON2_ITERATIONS")
                .default_value("2")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_ARGON2_PARALLELISM)
                .long(ARG_ARGON2_PARALLELISM)
                .help("Argon2id lanes")
                .env("TESSERA_ARGON2_PARALLELISM")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}
