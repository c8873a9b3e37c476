// ==========================================
// 铁路大亨 - 命令行入口
// ==========================================
// 用法:
//   rail-tycoon <stations_file> <lines_file> [排除的等级编码...]
// 例如:
//   rail-tycoon stations.txt lines.txt 1 3
// 输出: 路网在排除给定等级后是否连通
// ==========================================

use rail_tycoon::app::{get_default_config_path, AppState};
use rail_tycoon::logging;
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (stations_path, lines_path) = match (args.next(), args.next()) {
        (Some(s), Some(l)) => (s, l),
        _ => {
            eprintln!("用法: rail-tycoon <stations_file> <lines_file> [排除的等级编码...]");
            return Ok(ExitCode::from(2));
        }
    };

    let excluded_codes = args
        .map(|raw| {
            raw.trim()
                .parse::<i32>()
                .map_err(|e| format!("无效的等级编码 '{}': {}", raw, e))
        })
        .collect::<Result<Vec<i32>, String>>()?;

    tracing::info!("==================================================");
    tracing::info!("{} v{}", rail_tycoon::APP_NAME, rail_tycoon::VERSION);
    tracing::info!("==================================================");

    let state = AppState::new(get_default_config_path())?;
    state.load_network(&stations_path, &lines_path)?;

    let connected = state.read(|api| api.verify_connectivity_by_codes(&excluded_codes))??;
    let (stations, lines) = state.read(|api| (api.graph().station_count(), api.graph().line_count()))?;

    println!("stations={} lines={} excluded={:?}", stations, lines, excluded_codes);
    println!("connected={}", connected);

    Ok(if connected {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
