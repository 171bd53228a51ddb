//! `yafray-build flags` command

use anyhow::Result;

use crate::cli::{FlagsArgs, GlobalArgs};
use yafray_build::ops::flags;
use yafray_build::BuildEnvironment;

pub fn execute(global: &GlobalArgs, args: FlagsArgs) -> Result<()> {
    let opts = super::load_options(global, &args.args)?;
    let report = flags(&opts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_env("shared library", &report.shared);
    print_env("plugin", &report.plugin);
    print_env("program", &report.program);
    Ok(())
}

fn print_env(label: &str, env: &BuildEnvironment) {
    println!("# {}", label);
    println!("compile: {}", env.compile_args().join(" "));
    println!("link:    {}", env.link_args().join(" "));
    if !env.shlinkflags.is_empty() {
        println!("shlink:  {}", env.shlinkflags.join(" "));
    }
    println!("suffix:  {}", env.shlib_suffix);
    println!();
}
