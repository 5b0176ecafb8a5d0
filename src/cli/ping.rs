// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Ping command - liveness check

use miette::Result;

/// Body printed by `dagcheck ping`
pub fn pong() -> serde_json::Value {
    serde_json::json!({ "Ping": "Pong" })
}

/// Run the ping command
pub async fn run() -> Result<()> {
    println!("{}", pong());
    Ok(())
}
