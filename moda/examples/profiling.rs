use moda::io::read_trajectory;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).expect("expected a command line argument");

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    time_graph::clear_collected_data();

    let simulation = time_graph::spanned!("Reading trajectory", {
        read_trajectory(&path, 1.0)?
    });

    for configuration in &simulation {
        let supercell = configuration.supercell(2, 2, 2)?;
        let distances = supercell.distances_by_type_pair();
        for (pair, values) in &distances {
            let closest = values.iter().copied().fold(f64::INFINITY, f64::min);
            println!("{}: {} pairs, closest at {:.4}", pair, values.len(), closest);
        }
    }

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}
