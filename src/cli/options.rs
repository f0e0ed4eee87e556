//! Shared database connection options
//!
//! `BaseOpt` is the single table of option specifications. Every subcommand
//! that talks to a database flattens [`DbArgs`], whose fields are declared
//! straight from those entries, so defaults, help text and environment
//! variables cannot drift apart between commands.
//!
//! Resolution per option: explicit flag > `MZT_*` environment variable > default.

use std::fmt;
use std::net::IpAddr;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};
use serde::Serialize;
use url::Url;

use crate::cli::error::{CliError, CliResult};

/// Prefix shared by every environment variable in the catalog.
pub const ENV_PREFIX: &str = "MZT_";

/// Immutable option specification: default, help text and env override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptSpec<T: 'static> {
    pub default: T,
    pub help: &'static str,
    pub env: &'static str,
}

/// Catalog of the database connection options.
pub struct BaseOpt;

impl BaseOpt {
    pub const DB_PORT: OptSpec<u16> = OptSpec {
        default: 6875,
        help: "DB connection port.",
        env: "MZT_DB_PORT",
    };

    pub const DB_HOST: OptSpec<&'static str> = OptSpec {
        default: "localhost",
        help: "DB connection host.",
        env: "MZT_DB_HOST",
    };

    pub const DB_NAME: OptSpec<&'static str> = OptSpec {
        default: "materialize",
        help: "DB connection database.",
        env: "MZT_DB_NAME",
    };

    pub const DB_USER: OptSpec<&'static str> = OptSpec {
        default: "materialize",
        help: "DB connection user.",
        env: "MZT_DB_USER",
    };

    pub const DB_PASS: OptSpec<Option<&'static str>> = OptSpec {
        default: None,
        help: "DB connection password.",
        env: "MZT_DB_PASS",
    };

    pub const DB_REQUIRE_SSL: OptSpec<bool> = OptSpec {
        default: false,
        help: "DB connection requires SSL.",
        env: "MZT_DB_REQUIRE_SSL",
    };

    /// Environment variables of all entries, in declaration order.
    pub fn env_vars() -> [&'static str; 6] {
        let vars = [
            Self::DB_PORT.env,
            Self::DB_HOST.env,
            Self::DB_NAME.env,
            Self::DB_USER.env,
            Self::DB_PASS.env,
            Self::DB_REQUIRE_SSL.env,
        ];
        debug_assert!(vars.iter().all(|v| v.starts_with(ENV_PREFIX)));
        vars
    }
}

/// Database connection options, resolved for one invocation
#[derive(Args, Clone, PartialEq, Eq, Serialize)]
#[group(id = "database")]
pub struct DbArgs {
    #[arg(
        long = "db-port",
        env = BaseOpt::DB_PORT.env,
        default_value_t = BaseOpt::DB_PORT.default,
        help = BaseOpt::DB_PORT.help,
    )]
    #[serde(rename = "port")]
    pub db_port: u16,

    #[arg(
        long = "db-host",
        env = BaseOpt::DB_HOST.env,
        default_value = BaseOpt::DB_HOST.default,
        help = BaseOpt::DB_HOST.help,
    )]
    #[serde(rename = "host")]
    pub db_host: String,

    #[arg(
        long = "db-name",
        env = BaseOpt::DB_NAME.env,
        default_value = BaseOpt::DB_NAME.default,
        help = BaseOpt::DB_NAME.help,
    )]
    #[serde(rename = "database")]
    pub db_name: String,

    #[arg(
        long = "db-user",
        env = BaseOpt::DB_USER.env,
        default_value = BaseOpt::DB_USER.default,
        help = BaseOpt::DB_USER.help,
    )]
    #[serde(rename = "user")]
    pub db_user: String,

    // No default: an absent password is distinct from an empty one.
    #[arg(
        long = "db-pass",
        env = BaseOpt::DB_PASS.env,
        hide_env_values = true,
        help = BaseOpt::DB_PASS.help,
    )]
    #[serde(
        rename = "password",
        serialize_with = "mask_password",
        skip_serializing_if = "Option::is_none"
    )]
    pub db_pass: Option<String>,

    #[arg(
        long = "db-require-ssl",
        env = BaseOpt::DB_REQUIRE_SSL.env,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
        help = BaseOpt::DB_REQUIRE_SSL.help,
    )]
    #[serde(rename = "require_ssl")]
    pub db_require_ssl: bool,
}

const PASSWORD_MASK: &str = "********";

fn mask_password<S: serde::Serializer>(pass: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    match pass {
        Some(_) => s.serialize_str(PASSWORD_MASK),
        None => s.serialize_none(),
    }
}

impl fmt::Debug for DbArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbArgs")
            .field("db_port", &self.db_port)
            .field("db_host", &self.db_host)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_pass", &self.db_pass.as_ref().map(|_| PASSWORD_MASK))
            .field("db_require_ssl", &self.db_require_ssl)
            .finish()
    }
}

impl Default for DbArgs {
    fn default() -> Self {
        Self {
            db_port: BaseOpt::DB_PORT.default,
            db_host: BaseOpt::DB_HOST.default.to_string(),
            db_name: BaseOpt::DB_NAME.default.to_string(),
            db_user: BaseOpt::DB_USER.default.to_string(),
            db_pass: BaseOpt::DB_PASS.default.map(str::to_string),
            db_require_ssl: BaseOpt::DB_REQUIRE_SSL.default,
        }
    }
}

impl DbArgs {
    /// Reject values that parse but cannot name a reachable database.
    pub fn validate(&self) -> CliResult<()> {
        if self.db_port == 0 {
            return Err(CliError::user("DB connection port must be between 1 and 65535"));
        }
        for (flag, value) in [
            ("--db-host", &self.db_host),
            ("--db-name", &self.db_name),
            ("--db-user", &self.db_user),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::user(format!("{flag} must not be empty")));
            }
        }
        Ok(())
    }

    /// Resolved settings as TOML, password masked.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Render {
            what: "DB settings".into(),
            message: e.to_string(),
        })
    }

    /// `postgres://` connection URL for these settings.
    ///
    /// An empty password produces no password segment, same as an absent one.
    pub fn url(&self) -> CliResult<String> {
        let invalid = |what: &str| CliError::user(format!("invalid DB connection {what}"));

        let mut url = Url::parse("postgres://localhost/").map_err(|_| invalid("URL"))?;
        let host = match self.db_host.parse::<IpAddr>() {
            Ok(ip) => url.set_ip_host(ip),
            Err(_) => url.set_host(Some(&self.db_host)).map_err(|_| ()),
        };
        host.map_err(|_| invalid("host"))?;
        url.set_port(Some(self.db_port)).map_err(|_| invalid("port"))?;
        url.set_username(&self.db_user).map_err(|_| invalid("user"))?;
        url.set_password(self.db_pass.as_deref()).map_err(|_| invalid("password"))?;
        url.path_segments_mut()
            .map_err(|_| invalid("database"))?
            .clear()
            .push(&self.db_name);
        if self.db_require_ssl {
            url.query_pairs_mut().append_pair("sslmode", "require");
        }
        Ok(url.into())
    }
}
