//  Licensed to the Apache Software Foundation (ASF) under one
//  or more contributor license agreements.  See the NOTICE file
//  distributed with this work for additional information
//  regarding copyright ownership.  The ASF licenses this file
//  to you under the Apache License, Version 2.0 (the
//  "License"); you may not use this file except in compliance
//  with the License.  You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing,
//  software distributed under the License is distributed on an
//  "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
//  KIND, either express or implied.  See the License for the
//  specific language governing permissions and limitations
//  under the License.

use std::str::FromStr;

use tracing::Level;

/// Installs a `tracing_subscriber` fmt subscriber.
///
/// The level comes from `RUST_LOG` and falls back to `INFO` when the variable
/// is unset or not a plain level name. Does nothing if a global subscriber is
/// already installed.
pub fn init_logger() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| Level::from_str(level.trim()).ok())
        .unwrap_or(Level::INFO);
    init_logger_with_level(level);
}

/// Installs a fmt subscriber capped at `level`.
///
/// Repeated calls are a no-op: `try_init` fails once a global subscriber is
/// set, and that result is dropped.
pub fn init_logger_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(level)
        .try_init();
}
