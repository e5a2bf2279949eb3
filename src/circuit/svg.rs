//! SVG circuit diagrams
//!
//! Draws a circuit in the usual textbook layout: one horizontal wire per
//! qubit, a double classical wire underneath, gates as labelled boxes and
//! measurements as meters wired down to their classical bit.

use crate::circuit::{Circuit, Gate};
use crate::constants::artifacts::circuit_file_name;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const LEFT_MARGIN: f64 = 70.0;
const RIGHT_MARGIN: f64 = 30.0;
const TOP_MARGIN: f64 = 40.0;
const WIRE_SPACING: f64 = 50.0;
const COLUMN_WIDTH: f64 = 56.0;
const GATE_SIZE: f64 = 36.0;

/// Where each gate lands on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Gate { gate: Gate, column: usize },
    Barrier { column: usize },
}

/// Assign columns: gates pack to the left per wire, a barrier separates the
/// first measurement from everything before it, and measurements are
/// staggered so their wires to the classical register never overlap.
fn layout(circuit: &Circuit) -> (Vec<Slot>, usize) {
    let mut depth = vec![0usize; circuit.num_qubits()];
    let mut slots = Vec::with_capacity(circuit.gates().len() + 1);
    let mut last_measure: Option<usize> = None;

    for &gate in circuit.gates() {
        let q = gate.qubit();
        let column = match gate {
            Gate::Measure(_) => {
                let column = match last_measure {
                    Some(prev) => depth[q].max(prev + 1),
                    None => {
                        let barrier = depth.iter().copied().max().unwrap_or(0);
                        slots.push(Slot::Barrier { column: barrier });
                        depth.iter_mut().for_each(|d| *d = barrier + 1);
                        barrier + 1
                    }
                };
                last_measure = Some(column);
                column
            }
            Gate::H(_) | Gate::X(_) => depth[q],
        };
        depth[q] = column + 1;
        slots.push(Slot::Gate { gate, column });
    }

    let columns = depth.into_iter().max().unwrap_or(0).max(1);
    (slots, columns)
}

fn column_x(column: usize) -> f64 {
    LEFT_MARGIN + COLUMN_WIDTH * (column as f64 + 0.5)
}

fn wire_y(qubit: usize) -> f64 {
    TOP_MARGIN + WIRE_SPACING * qubit as f64
}

/// Render `circuit` as a standalone SVG document
pub fn render(circuit: &Circuit) -> Result<String> {
    let n = circuit.num_qubits();
    if n == 0 {
        return Err(Error::Rendering(
            "cannot draw a circuit with no qubits".to_string(),
        ));
    }

    let (slots, columns) = layout(circuit);
    let width = LEFT_MARGIN + COLUMN_WIDTH * columns as f64 + RIGHT_MARGIN;
    let classical_y = wire_y(n);
    let height = classical_y + TOP_MARGIN;
    let wire_end = width - RIGHT_MARGIN / 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    svg.push('\n');
    svg.push_str("  <style>\n");
    svg.push_str("    .wire { stroke: #000; stroke-width: 1; }\n");
    svg.push_str("    .clbit { stroke: #777; stroke-width: 1; }\n");
    svg.push_str("    .barrier { stroke: #999; stroke-width: 1; stroke-dasharray: 4 3; }\n");
    svg.push_str("    .label { font: 14px monospace; }\n");
    svg.push_str("    .gate-h rect { fill: #6fa4ff; stroke: #6fa4ff; }\n");
    svg.push_str("    .gate-x circle { fill: #05bab6; stroke: #05bab6; }\n");
    svg.push_str("    .measure rect { fill: #a8a8a8; stroke: #a8a8a8; }\n");
    svg.push_str("    .gate text { font: 16px sans-serif; fill: #000; }\n");
    svg.push_str("  </style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#fff\"/>\n");

    // Quantum wires
    for q in 0..n {
        let y = wire_y(q);
        svg.push_str(&format!(
            "  <text class=\"label\" x=\"10\" y=\"{}\">q_{}</text>\n",
            y + 5.0,
            q
        ));
        svg.push_str(&format!(
            "  <line class=\"wire\" x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\"/>\n",
            LEFT_MARGIN - 10.0,
            wire_end,
            y = y
        ));
    }

    // Classical register
    svg.push_str(&format!(
        "  <text class=\"label\" x=\"10\" y=\"{}\">meas</text>\n",
        classical_y + 5.0
    ));
    for offset in [-1.5, 1.5] {
        svg.push_str(&format!(
            "  <line class=\"clbit\" x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\"/>\n",
            LEFT_MARGIN - 10.0,
            wire_end,
            y = classical_y + offset
        ));
    }
    svg.push_str(&format!(
        "  <text class=\"label\" x=\"{}\" y=\"{}\">{}</text>\n",
        LEFT_MARGIN - 4.0,
        classical_y - 6.0,
        n
    ));

    for slot in &slots {
        match *slot {
            Slot::Barrier { column } => {
                let x = LEFT_MARGIN + COLUMN_WIDTH * column as f64 + COLUMN_WIDTH / 2.0;
                svg.push_str(&format!(
                    "  <line class=\"barrier\" x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\"/>\n",
                    wire_y(0) - GATE_SIZE / 2.0,
                    wire_y(n - 1) + GATE_SIZE / 2.0,
                    x = x
                ));
            }
            Slot::Gate { gate, column } => {
                push_gate(&mut svg, gate, column_x(column), classical_y);
            }
        }
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn push_gate(svg: &mut String, gate: Gate, cx: f64, classical_y: f64) {
    let cy = wire_y(gate.qubit());
    let half = GATE_SIZE / 2.0;

    match gate {
        Gate::H(_) => {
            svg.push_str("  <g class=\"gate gate-h\">\n");
            svg.push_str(&format!(
                "    <rect x=\"{}\" y=\"{}\" width=\"{s}\" height=\"{s}\"/>\n",
                cx - half,
                cy - half,
                s = GATE_SIZE
            ));
            svg.push_str(&format!(
                "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">H</text>\n",
                cx,
                cy + 6.0
            ));
            svg.push_str("  </g>\n");
        }
        Gate::X(_) => {
            svg.push_str("  <g class=\"gate gate-x\">\n");
            svg.push_str(&format!(
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n",
                cx,
                cy,
                half * 0.6
            ));
            svg.push_str(&format!(
                "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">X</text>\n",
                cx,
                cy + 6.0
            ));
            svg.push_str("  </g>\n");
        }
        Gate::Measure(q) => {
            svg.push_str("  <g class=\"gate measure\">\n");
            svg.push_str(&format!(
                "    <rect x=\"{}\" y=\"{}\" width=\"{s}\" height=\"{s}\"/>\n",
                cx - half,
                cy - half,
                s = GATE_SIZE
            ));
            // Meter dial and needle
            svg.push_str(&format!(
                "    <path d=\"M {} {} A 12 12 0 0 1 {} {}\" fill=\"none\" stroke=\"#000\"/>\n",
                cx - 12.0,
                cy + 6.0,
                cx + 12.0,
                cy + 6.0
            ));
            svg.push_str(&format!(
                "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#000\"/>\n",
                cx,
                cy + 6.0,
                cx + 9.0,
                cy - 10.0
            ));
            // Wire down to the classical bit
            for offset in [-1.5, 1.5] {
                svg.push_str(&format!(
                    "    <line class=\"clbit\" x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\"/>\n",
                    cy + half,
                    classical_y - 6.0,
                    x = cx + offset
                ));
            }
            svg.push_str(&format!(
                "    <path d=\"M {} {} L {} {} L {} {} Z\" fill=\"#777\"/>\n",
                cx - 5.0,
                classical_y - 8.0,
                cx + 5.0,
                classical_y - 8.0,
                cx,
                classical_y
            ));
            svg.push_str(&format!(
                "    <text class=\"label\" x=\"{}\" y=\"{}\">{}</text>\n",
                cx + 6.0,
                classical_y + 18.0,
                q
            ));
            svg.push_str("  </g>\n");
        }
    }
}

/// Draw the uniform-superposition circuit for `num_qubits` and save it under `dir`
///
/// Creates `dir` if needed and returns the path written.
pub fn draw_and_save(num_qubits: usize, dir: &Path) -> Result<PathBuf> {
    let circuit = Circuit::uniform_superposition(num_qubits);
    let svg = render(&circuit)?;

    fs::create_dir_all(dir).map_err(|e| {
        Error::Rendering(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(circuit_file_name(num_qubits));
    fs::write(&path, svg)
        .map_err(|e| Error::Rendering(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), num_qubits, "saved circuit diagram");
    Ok(path)
}
