// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traces of points carried by rolling wheels, as an SVG page.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use roulette::{Circle, Line, ParamCurve, Point, Roulette, RouletteResult};

const STEPS: usize = 2000;

/// Roll `roulette` for `STEPS` steps, returning the path of each pen.
fn trace<R: ParamCurve, B: ParamCurve>(
    roulette: &mut Roulette<R, B>,
    pens: &[Point],
) -> RouletteResult<Vec<String>> {
    let mut points = pens.to_vec();
    let mut paths: Vec<String> = points.iter().map(|p| format!("M{:.2},{:.2}", p.x, p.y)).collect();
    for _ in 0..STEPS {
        roulette.step(&mut points)?;
        for (path, p) in paths.iter_mut().zip(&points) {
            path.push_str(&format!(" L{:.2},{:.2}", p.x, p.y));
        }
    }
    Ok(paths)
}

fn sample(curve: &impl ParamCurve, t0: f64, t1: f64, n: usize) -> String {
    let mut path = String::new();
    for i in 0..=n {
        let p = curve.eval(t0 + (t1 - t0) * i as f64 / n as f64);
        let cmd = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{cmd}{:.2},{:.2} ", p.x, p.y));
    }
    path
}

fn main() -> RouletteResult<()> {
    // SVG is Y-down: the ground line is at y = 300 and wheels sit above it.
    let radius = 60.0;
    let wheel = Circle::new((100.0, 300.0 - radius), radius).with_phase(FRAC_PI_2).reversed();
    let ground = Line::new((100.0, 300.0), (101.0, 300.0));
    let mut cycloid = Roulette::new(wheel, ground, 0.0, 2.0 * TAU * radius / STEPS as f64)?;
    let cycloid_pens = [
        Point::new(100.0, 300.0),
        Point::new(100.0, 300.0 - radius / 2.0),
        Point::new(100.0, 300.0 + radius / 2.0),
    ];
    let cycloid_paths = trace(&mut cycloid, &cycloid_pens)?;

    // A small circle rolling around the outside of a larger one.
    let hub = Circle::new((400.0, 600.0), 150.0);
    let rider = Circle::new((600.0, 600.0), 50.0).with_phase(PI).reversed();
    let mut epicycloid = Roulette::new(rider, hub, 0.0, hub.perimeter() / STEPS as f64)?;
    let epicycloid_paths = trace(&mut epicycloid, &[Point::new(550.0, 600.0)])?;

    println!("<!DOCTYPE html>");
    println!("<html>");
    println!("<body>");
    println!("<svg height=\"900\" width=\"900\">");
    println!("  <path d=\"{}\" stroke=\"gray\" fill=\"none\" />", sample(&ground, -50.0, 800.0, 1));
    println!("  <path d=\"{}\" stroke=\"gray\" fill=\"none\" />", sample(&hub, 0.0, hub.perimeter(), 200));
    for (path, color) in cycloid_paths.iter().zip(["black", "blue", "red"]) {
        println!("  <path d=\"{path}\" stroke=\"{color}\" fill=\"none\" />");
    }
    for path in &epicycloid_paths {
        println!("  <path d=\"{path}\" stroke=\"green\" fill=\"none\" />");
    }
    println!("</svg>");
    println!("</body>");
    println!("</html>");
    Ok(())
}
