// ==========================================
// 路网数据文件生成器
// ==========================================
// 用途: 生成各规模的车站/线路文件, 以及两组错误数据
// 输出: tests/fixtures/datasets/*.txt
// 用法: generate_network_data [输出目录] [规模...]
// ==========================================

use rail_tycoon::benchmark::NetworkGenerator;
use rail_tycoon::importer::{write_lines, write_stations};
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const DEFAULT_SIZES: &[usize] = &[100, 1000, 10000, 100000];

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/datasets"));
    let mut sizes = args
        .map(|s| s.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;
    if sizes.is_empty() {
        sizes = DEFAULT_SIZES.to_vec();
    }

    fs::create_dir_all(&out_dir)?;
    println!("开始生成路网数据 -> {}", out_dir.display());

    // 1. 各规模连通路网
    let generator = NetworkGenerator::default();
    for size in sizes {
        let graph = generator.generate(size)?;
        write_stations(&graph, File::create(out_dir.join(format!("stations_{}.txt", size)))?)?;
        write_lines(&graph, File::create(out_dir.join(format!("lines_{}.txt", size)))?)?;
        println!("✓ 规模 {}: {} 站 / {} 线", size, graph.station_count(), graph.line_count());
    }

    // 2. 未定义等级编码
    generate_unknown_category(&out_dir)?;

    // 3. 引用不存在的车站
    generate_missing_station(&out_dir)?;

    println!("✓ 所有路网数据生成完成！");
    Ok(())
}

fn generate_unknown_category(dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(dir.join("stations_bad_category.txt"), "A, B, C\n")?;
    let mut lines = File::create(dir.join("lines_bad_category.txt"))?;
    writeln!(lines, "A;B;1")?;
    writeln!(lines, "B;C;9")?;
    Ok(())
}

fn generate_missing_station(dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(dir.join("stations_missing_station.txt"), "A, B\n")?;
    let mut lines = File::create(dir.join("lines_missing_station.txt"))?;
    writeln!(lines, "A;B;2")?;
    writeln!(lines, "B;Q;2")?;
    Ok(())
}
