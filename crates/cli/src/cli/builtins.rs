use clap::Args;
use typegap_core::BuiltinTable;

#[derive(Args, Debug, Clone, Copy)]
pub struct BuiltinsArgs {
    #[arg(long, help = "Only list types that are nullable by default")]
    pub nullable: bool,
}

pub fn run(args: &BuiltinsArgs) -> i32 {
    for line in builtin_lines(&BuiltinTable::standard(), args.nullable) {
        println!("{line}");
    }
    0
}

fn builtin_lines(table: &BuiltinTable, nullable_only: bool) -> Vec<String> {
    table
        .iter()
        .filter(|(_, builtin)| !nullable_only || builtin.nullable)
        .map(|(key, builtin)| {
            let suffix = if builtin.nullable { " (nullable)" } else { "" };
            format!("{key} => {}{suffix}", builtin.name)
        })
        .collect()
}
