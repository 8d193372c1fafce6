#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const HEADER: &str = "dateTime,name,open,high,low,close,volume,atr,weighting,weightingAtr,newHour,fixedLow,fixedHigh,mapTime";
pub const HEADER_OUT: &str = "dateTime,name,open,high,low,close,volume,atr,weighting,weightingAtr,newHour,fixedLow,fixedHigh,mapTime,holiday";

pub fn rhf() -> Command {
    cargo_bin_cmd!("rhourfill")
}

/// Create a unique path inside the system temp dir and remove any existing file
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rhourfill_{}.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// Write `lines` (newline terminated) to a fresh temp CSV and return its path
pub fn write_input(name: &str, lines: &[&str]) -> PathBuf {
    let path = temp_path(&format!("{name}_in"), "csv");
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    fs::write(&path, content).expect("write input csv");
    path
}

/// An original bar with the standard market columns.
pub fn bar(ts: &str, name: &str, open: u32) -> String {
    format!(
        "{ts},{name},{open},{},{},{},1000,10,1.00,1.00,false,{},{},{ts}",
        open + 20,
        open - 10,
        open + 10,
        open - 10,
        open + 20
    )
}

/// Expected synthetic line with every non-key field set to -1.
pub fn synthetic(ts: &str, name: &str) -> String {
    format!("{ts},{name},{},1", ["-1"; 12].join(","))
}

/// Expected synthetic line when `mapTime` echoes the timestamp.
pub fn synthetic_echo(ts: &str, name: &str) -> String {
    format!("{ts},{name},{},{ts},1", ["-1"; 11].join(","))
}

pub fn original(line: &str) -> String {
    format!("{line},0")
}

pub fn read_lines(path: &PathBuf) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output csv")
        .lines()
        .map(str::to_string)
        .collect()
}
