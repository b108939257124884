//! Text summaries of a loaded dataset.

use crate::data::QesReader;

/// Summarize a dataset as an indented tree.
pub fn summarize(reader: &QesReader, title: Option<&str>) -> String {
    let mut text = String::new();

    if let Some(title) = title {
        text.push_str(&format!("Dataset: {}\n", title));
    } else {
        text.push_str("Dataset\n");
    }
    text.push_str(&"=".repeat(60));
    text.push('\n');

    let building_lines: Vec<String> = reader
        .buildings()
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let samples: usize = b.faces().iter().map(|f| f.sample_count()).sum();
            format!("Building {} ({} faces, {} samples)", i, b.faces().len(), samples)
        })
        .collect();
    push_section(
        &mut text,
        &format!("Buildings ({})", reader.buildings().len()),
        &building_lines,
        false,
    );

    let sensor_lines: Vec<String> = reader
        .sensors()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let c = s.center();
            format!(
                "Sensor {} at ({:.2}, {:.2}, {:.2}), patch {}",
                i,
                c.x,
                c.y,
                c.z,
                s.face().patch_index
            )
        })
        .collect();
    push_section(
        &mut text,
        &format!("Sensors ({})", reader.sensors().len()),
        &sensor_lines,
        false,
    );

    let timestamps = reader.timestamps();
    let timestamp_lines: Vec<String> = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => vec![format!("first: {}", first), format!("last:  {}", last)],
        _ => Vec::new(),
    };
    push_section(
        &mut text,
        &format!("Timesteps ({})", timestamps.len()),
        &timestamp_lines,
        false,
    );

    let variable_lines: Vec<String> = reader
        .variables()
        .iter()
        .map(|v| {
            format!(
                "{} [{}] {} ({}) range {} .. {}",
                v.name,
                v.kind.name(),
                v.long_name,
                v.unit,
                v.min,
                v.max
            )
        })
        .collect();
    push_section(
        &mut text,
        &format!("Variables ({})", reader.variables().len()),
        &variable_lines,
        false,
    );

    let (w, h, d) = reader.grid_shape();
    let p = reader.patch_dims();
    let dim_lines = vec![
        format!("world: {} x {} x {} cells", w, h, d),
        format!("patch: {} x {} x {}", p.x, p.y, p.z),
        format!("patch samples: {}", reader.patch_sample_count()),
    ];
    push_section(&mut text, "Dimensions", &dim_lines, true);

    text
}

fn push_section(text: &mut String, heading: &str, lines: &[String], is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    text.push_str(&format!("{}{}\n", connector, heading));

    let prefix = if is_last { "    " } else { "│   " };
    for (i, line) in lines.iter().enumerate() {
        let child = if i == lines.len() - 1 { "└── " } else { "├── " };
        text.push_str(&format!("{}{}{}\n", prefix, child, line));
    }
}
