use crux::{
    config::Config, evolve::RouteOptimizer, parse_difficulty, parse_style, route::Route,
};
use std::{env, path::Path, process};

const CONFIG_PATH: &str = "config.toml";

fn load_config() -> crux::Result<Config> {
    let path = Path::new(CONFIG_PATH);
    let config = if path.exists() {
        log::info!("loading configuration from '{CONFIG_PATH}'");
        Config::load(path)?
    } else {
        log::info!("no '{CONFIG_PATH}' found, using defaults");
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let grade = args.next().unwrap_or_else(|| "6B".into());
    let style_text = args.next().unwrap_or_else(|| "crimpy and technical".into());

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let board = config.board.build();
    let difficulty = parse_difficulty(&grade);
    let style = parse_style(&style_text);
    log::info!(
        "{}x{} board, grade '{grade}' -> {difficulty:.2}, style '{style_text}'",
        config.board.rows,
        config.board.cols
    );

    let route: Route = match RouteOptimizer::new(&board, &style, difficulty, &config.evolution)
        .and_then(|optimizer| optimizer.run())
    {
        Ok(evolution) => evolution.into_route(),
        Err(e) => {
            log::error!("route generation failed: {e}");
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&route.summary(&board)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("cannot serialize route: {e}");
            process::exit(1);
        }
    }
}
