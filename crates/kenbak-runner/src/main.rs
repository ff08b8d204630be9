//! Command-line host for the KENBAK-1 instruction engine.
//!
//! Loads a raw memory image at address 0 (so the image's byte 3 becomes
//! the initial program counter), steps the engine until it halts or the
//! step limit runs out, and echoes every change of the memory-mapped
//! OUTPUT port. Ends with a front-panel style register dump.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use kenbak_1::{
    Kenbak1, MEMORY_SIZE, REG_A, REG_B, REG_FLAGS_A, REG_FLAGS_B, REG_FLAGS_X, REG_OUTPUT, REG_P,
    REG_X,
};

const DEFAULT_LIMIT: u64 = 1_000_000;

struct Args {
    extended: bool,
    limit: u64,
    image: PathBuf,
}

fn usage() -> ! {
    eprintln!("usage: kenbak-runner [--extended] [--limit N] IMAGE");
    eprintln!();
    eprintln!("  IMAGE       raw memory image, up to {MEMORY_SIZE} bytes, loaded at 0");
    eprintln!("  --extended  enable the paged 1K extension");
    eprintln!("  --limit N   stop after N instructions (default {DEFAULT_LIMIT})");
    process::exit(2);
}

fn parse_args() -> Args {
    let mut extended = false;
    let mut limit = DEFAULT_LIMIT;
    let mut image = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--extended" => extended = true,
            "--limit" => {
                let Some(value) = args.next().and_then(|n| n.parse().ok()) else {
                    usage();
                };
                limit = value;
            }
            "--help" | "-h" => usage(),
            _ if arg.starts_with('-') => usage(),
            _ if image.is_some() => usage(),
            _ => image = Some(PathBuf::from(arg)),
        }
    }

    let Some(image) = image else { usage() };
    Args {
        extended,
        limit,
        image,
    }
}

fn main() {
    let args = parse_args();

    let image = fs::read(&args.image).unwrap_or_else(|err| {
        eprintln!("kenbak-runner: {}: {err}", args.image.display());
        process::exit(1);
    });
    if image.len() > MEMORY_SIZE {
        eprintln!(
            "kenbak-runner: {}: image is {} bytes, memory is {MEMORY_SIZE}",
            args.image.display(),
            image.len()
        );
        process::exit(1);
    }

    let mut cpu = if args.extended {
        Kenbak1::new_extended()
    } else {
        Kenbak1::new()
    };
    cpu.memory_mut().load(0, &image);

    let mut output = cpu.memory().read(REG_OUTPUT);
    let mut steps: u64 = 0;
    let halted = loop {
        if steps >= args.limit {
            break false;
        }
        let running = cpu.step();
        steps += 1;

        let port = cpu.memory().read(REG_OUTPUT);
        if port != output {
            output = port;
            println!("output: {port:03o}");
        }
        if !running {
            break true;
        }
    };

    if halted {
        println!("halted after {steps} instructions");
    } else {
        println!("stopped at the {steps}-instruction limit");
    }

    let mem = cpu.memory();
    println!(
        "A {:03o}  B {:03o}  X {:03o}  P {:03o}",
        mem.read(REG_A),
        mem.read(REG_B),
        mem.read(REG_X),
        mem.read(REG_P)
    );
    println!(
        "flags A {:03o}  B {:03o}  X {:03o}  page {}",
        mem.read(REG_FLAGS_A),
        mem.read(REG_FLAGS_B),
        mem.read(REG_FLAGS_X),
        mem.page_base() >> 8
    );
}
