use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{cvrptw::Instance, GenerationError};

/// Fleet size written into every Gen8 vehicle section.
pub const VEHICLE_COUNT: usize = 30;

pub fn write_gen8<W: Write>(instance: &Instance, mut writer: W) -> Result<(), GenerationError> {
    writeln!(writer, "Gen8")?;
    writeln!(writer)?;
    writeln!(writer, "VEHICLE")?;
    writeln!(writer, "NUMBER     CAPACITY")?;
    writeln!(writer, "{}     {}", VEHICLE_COUNT, instance.max_capacity)?;
    writeln!(writer)?;
    writeln!(writer, "CUSTOMER")?;
    writeln!(
        writer,
        "CUST NO.     XCOORD.     YCOORD.     DEMAND     READY TIME     DUE DATE     SERVICE TIME"
    )?;
    writeln!(writer)?;

    let (depot_x, depot_y) = instance.depot_position;
    let (depot_ready, depot_due) = instance.depot_time_window;
    write_row(
        &mut writer,
        &[
            0,
            depot_x as i64,
            depot_y as i64,
            0,
            depot_ready as i64,
            depot_due as i64,
            0,
        ],
    )?;

    for (node, &(x, y)) in instance.node_positions.iter().enumerate() {
        let (ready, due) = instance.time_windows[node];
        write_row(
            &mut writer,
            &[
                node as i64 + 1,
                x as i64,
                y as i64,
                instance.demands[node] as i64,
                ready as i64,
                due as i64,
                instance.service_durations[node] as i64,
            ],
        )?;
    }
    Ok(())
}

pub fn save_gen8(instance: &Instance, path: &Path) -> Result<(), GenerationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_gen8(instance, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, row: &[i64]) -> std::io::Result<()> {
    let fields: Vec<String> = row.iter().map(|field| field.to_string()).collect();
    writeln!(writer, "{}", fields.join("    "))
}
