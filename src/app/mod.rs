// Application layer: wires configured adapters into the quote engine.

pub mod commands;
