use std::env;
use std::fs;

use morphox::{apply, decode, encode_png, Operation, OperationRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if !(4..=6).contains(&args.len()) {
        eprintln!(
            "Usage: {} <input_image> <operation> <output.png> [kernel_size] [iterations]",
            args[0]
        );
        eprintln!("Example: {} coins.jpg Dilasi dilated.png 5 2", args[0]);
        eprintln!(
            "Operations: {}",
            Operation::ALL.map(Operation::label).join(", ")
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let operation: Operation = args[2].parse()?;
    let output_path = &args[3];

    let mut request = OperationRequest::new(operation);
    if let Some(kernel_size) = args.get(4) {
        request = request.with_kernel_size(kernel_size.parse().map_err(|_| "Invalid kernel size")?);
    }
    if let Some(iterations) = args.get(5) {
        request = request.with_iterations(iterations.parse().map_err(|_| "Invalid iterations")?);
    }

    let bytes = fs::read(input_path)?;
    let image = decode(&bytes)?;
    println!(
        "Input: {}x{}, {} channel(s), {:.2} KB",
        image.width(),
        image.height(),
        image.channel_count(),
        bytes.len() as f64 / 1024.0
    );

    let result = apply(&image, &request)?;
    fs::write(output_path, encode_png(&result)?)?;

    println!(
        "{} -> {} (suggested name: {})",
        operation,
        output_path,
        operation.export_file_name()
    );

    Ok(())
}
