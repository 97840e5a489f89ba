//MIT License
#![allow(non_snake_case)]

use crate::Utils::logger::{save_critical_points_to_csv, save_surface_to_csv};
use crate::Utils::plots::{plot_contour, plot_surface3d};
use crate::analysis::{differentiate, find_critical_points, parse, sample_surface};
use tabled::Table;

#[allow(dead_code)]
pub fn critical_points_examples(example: usize) {
    match example {
        0 => {
            // PARSE AND EVALUATE
            // parse expression from string to a compiled function of (x, y)
            let input = "x^2 + y^2";
            let f = parse(input).unwrap();
            println!("parsed: {}", f.expression());
            // evaluate the compiled function at a point
            let f_res = f.call(1.0, 2.0);
            println!("f(1, 2) = {}", f_res);
            // evaluation reports domain failures as typed errors
            let g = parse("log(x)").unwrap();
            println!("log(-1) -> {:?}", g.eval(-1.0, 0.0));
        }
        1 => {
            // DERIVATIVE SET
            // all five partial derivatives come from one symbolic tree
            let input = "x^3 - 3*x*y^2";
            let derivatives = differentiate(input).unwrap();
            println!("fx = {}", derivatives.fx.expression());
            println!("fy = {}", derivatives.fy.expression());
            println!("fxx = {}", derivatives.fxx.expression());
            println!("fyy = {}", derivatives.fyy.expression());
            println!("fxy = {}", derivatives.fxy.expression());
            println!("fx(1, 1) = {}", derivatives.fx.call(1.0, 1.0));
        }
        2 => {
            // CRITICAL POINT SEARCH
            // scan the default rectangle and print a classification table
            let input = "x^2 - y^2";
            let points = find_critical_points(input, (-10.0, 10.0), (-10.0, 10.0), 20).unwrap();
            println!("{} critical point(s) of {}", points.len(), input);
            println!("{}", Table::new(&points));
            save_critical_points_to_csv(&points, "critical_points.csv").unwrap();
        }
        3 => {
            // SURFACE SAMPLING AND PLOTS
            let input = "sin(x) * cos(y)";
            let surface = sample_surface(input, (-5.0, 5.0), (-5.0, 5.0), 50).unwrap();
            let points = find_critical_points(input, (-5.0, 5.0), (-5.0, 5.0), 20).unwrap();
            println!("sampled {} x {} nodes", surface.x.len(), surface.y.len());
            println!("z bounds {:?}", surface.z_bounds());
            plot_contour(&surface, &points, input, "contour.png").unwrap();
            plot_surface3d(&surface, input, "surface.png").unwrap();
            save_surface_to_csv(&surface, "surface.csv").unwrap();
        }
        4 => {
            // PARTIAL DOMAINS
            // undefined regions become NaN holes in plots and skipped nodes
            // in the search; neither aborts
            let input = "log(x) + y^2";
            let surface = sample_surface(input, (-5.0, 5.0), (-5.0, 5.0), 50).unwrap();
            let holes = surface.z.iter().filter(|v| v.is_nan()).count();
            println!("{} undefined node(s) out of {}", holes, surface.z.len());
            let points = find_critical_points(input, (-10.0, 10.0), (-10.0, 10.0), 20).unwrap();
            println!("{} critical point(s)", points.len());
        }
        _ => {
            println!("there is no example with number {}", example);
        }
    }
}
