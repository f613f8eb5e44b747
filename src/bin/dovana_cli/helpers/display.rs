// ABOUTME: Output formatting helpers for dovana-cli
// ABOUTME: Consistent display of users, issued tokens and featured position changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use dovana::models::{PositionChange, User};

/// Display a newly created user
pub fn display_user(user: &User) {
    println!("\nUser created");
    println!("{}", "=".repeat(60));
    println!("   Id:    {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name:  {}", user.display_name);
    println!("   Admin: {}", if user.is_admin { "yes" } else { "no" });
    println!("{}", "=".repeat(60));
    println!("Issue a token with: dovana-cli token issue --email {}", user.email);
}

/// Display an issued bearer token
pub fn display_issued_token(user: &User, token: &str, expiry_hours: i64) {
    println!("\nToken issued for {} (valid {expiry_hours}h)", user.email);
    println!("{}", "=".repeat(60));
    println!("{token}");
    println!("{}", "=".repeat(60));
    println!("Send it as: Authorization: Bearer <token>");
}

/// Display the rows a position reset touched
pub fn display_position_changes(changes: &[PositionChange]) {
    if changes.is_empty() {
        println!("Featured positions already in id order; nothing changed");
        return;
    }
    println!("Featured positions updated:");
    for change in changes {
        println!("   row {}: {} -> {}", change.id, change.from, change.to);
    }
}
