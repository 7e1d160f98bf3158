//! Token command - mints a bearer token for local use

use crate::config::AppConfig;
use crate::infrastructure::auth::{JwtGenerator, JwtService};

use super::TokenArgs;

pub fn run(config: &AppConfig, args: &TokenArgs) -> anyhow::Result<()> {
    let token = mint(config, args)?;
    println!("{}", token);
    Ok(())
}

fn mint(config: &AppConfig, args: &TokenArgs) -> anyhow::Result<String> {
    let jwt = JwtService::new(config.auth.jwt_config());
    Ok(jwt.generate(&args.subject, args.role)?)
}
