//! oled-fonts - inspect the bitmap fonts in an OLED font directory

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::path::Path;

use oled_fonts::{Config, FontRegistry};

fn print_help() {
    println!(
        "oled-fonts {}

Inspect bitmap fonts for monochrome OLED displays

USAGE:
    oled-fonts [OPTIONS] <COMMAND>

COMMANDS:
    list                 List font numbers and names
    info <n>             Show the header of font <n>
    dump <n> <char>      Print the glyph rows of <char> in font <n> as hex

OPTIONS:
    -c, --config <path>  Config file (default: ~/.config/oled-fonts/config.toml)
    -d, --dir <path>     Font directory (overrides config)
        --init-config    Write a config template and exit
    -h, --help           Show this help
    -V, --version        Show version

ENVIRONMENT:
    RUST_LOG             Log filter (default: warn)",
        env!("CARGO_PKG_VERSION")
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // --help
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("oled-fonts {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default_config()?;
        println!("Config written: {}", path.display());
        return Ok(());
    }

    let mut config_path: Option<String> = None;
    let mut dir: Option<String> = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config_path = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("{} requires a path", arg))?
                        .clone(),
                );
            }
            "-d" | "--dir" => {
                dir = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("{} requires a path", arg))?
                        .clone(),
                );
            }
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => positional.push(other),
        }
    }

    let mut config = match config_path {
        Some(path) => Config::load_from_file(Path::new(&path))?,
        None => Config::load(),
    };
    if let Some(dir) = dir {
        config.fonts.dir = dir;
    }

    let mut registry = FontRegistry::from_config(&config);
    info!("Font directory: {}", registry.dir().display());

    match positional.as_slice() {
        ["list"] => list(&mut registry),
        ["info", number] => info_cmd(&mut registry, parse_number(number)?),
        ["dump", number, ch] => dump(&mut registry, parse_number(number)?, ch),
        _ => {
            print_help();
            bail!("Invalid command: {}", positional.join(" "))
        }
    }
}

fn parse_number(s: &str) -> Result<usize> {
    s.parse()
        .with_context(|| format!("Invalid font number: {}", s))
}

fn list(registry: &mut FontRegistry) -> Result<()> {
    let dir = registry.dir().to_path_buf();
    let names = registry.font_names()?;
    if names.is_empty() {
        println!("No fonts found in {}", dir.display());
        return Ok(());
    }
    for (number, name) in names.iter().enumerate() {
        if !name.is_empty() {
            println!("{:3}  {}", number, name);
        }
    }
    Ok(())
}

fn info_cmd(registry: &mut FontRegistry, number: usize) -> Result<()> {
    let font = registry
        .get_font(number)
        .with_context(|| format!("Failed to load font {}", number))?;
    let header = font.header();
    println!("width:         {}", header.glyph_width);
    println!("height:        {}", header.glyph_height);
    println!(
        "start_char:    {} ({:?})",
        header.start_char, header.start_char as char
    );
    println!("total_char:    {}", header.total_char);
    println!("map_width:     {}", header.map_width);
    println!("rows_per_char: {}", font.rows_per_char());
    println!("row_width:     {}", font.row_width());
    println!("rows:          {}", font.row_count());
    Ok(())
}

fn dump(registry: &mut FontRegistry, number: usize, ch: &str) -> Result<()> {
    let code = match ch.as_bytes() {
        [b] => *b,
        _ => bail!("Expected a single ASCII character, got {:?}", ch),
    };
    let font = registry
        .get_font(number)
        .with_context(|| format!("Failed to load font {}", number))?;
    let glyph = font.glyph(code)?;
    for (row, bytes) in glyph.rows().enumerate() {
        let key = font.key_for(code, row)?;
        let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        println!("[{:5}] {}", key, hex.join(" "));
    }
    Ok(())
}
