#![allow(non_snake_case)]

use critgrid::Utils::logger::{init_logger, save_critical_points_to_csv, save_surface_to_csv};
use critgrid::Utils::plots::{plot_contour, plot_surface3d};
use critgrid::analysis::{differentiate, find_critical_points, sample_surface};
use simplelog::LevelFilter;
use std::env;
use std::process;
use tabled::Table;

fn main() {
    init_logger(LevelFilter::Debug);
    let input = env::args().nth(1).unwrap_or_else(|| "x^2 - y^2".to_string());
    if let Err(e) = run(&input) {
        eprintln!("{input}: {e}");
        process::exit(1);
    }
}

fn run(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let derivatives = differentiate(input)?;
    println!("f = {}", input);
    println!("fx  = {}", derivatives.fx.expression());
    println!("fy  = {}", derivatives.fy.expression());
    println!("fxx = {}", derivatives.fxx.expression());
    println!("fyy = {}", derivatives.fyy.expression());
    println!("fxy = {}", derivatives.fxy.expression());

    let points = find_critical_points(input, (-10.0, 10.0), (-10.0, 10.0), 20)?;
    if points.is_empty() {
        println!("no critical points on the grid");
    } else {
        println!("{}", Table::new(&points));
    }
    save_critical_points_to_csv(&points, "critical_points.csv")?;

    let surface = sample_surface(input, (-5.0, 5.0), (-5.0, 5.0), 50)?;
    save_surface_to_csv(&surface, "surface.csv")?;
    plot_contour(&surface, &points, input, "contour.png")?;
    plot_surface3d(&surface, input, "surface.png")?;
    println!("saved contour.png, surface.png, critical_points.csv, surface.csv");
    Ok(())
}
