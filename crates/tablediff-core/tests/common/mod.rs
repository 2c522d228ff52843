#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use tablediff_core::prelude::*;

pub fn parse(sql: &str) -> TableDescription {
    Parser::new(sql)
        .parse_create_table()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_create_table()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(10, 20, 30))
        .expect("valid date")
}

/// Builds a snapshot from `CREATE TABLE` statements with a fixed timestamp.
pub fn schema(statements: &[&str]) -> SchemaDescription {
    let tables = statements.iter().map(|sql| parse(sql)).collect();
    SchemaDescription::with_timestamp(tables, fixed_time())
}

pub fn ignoring(features: &[SqlFeature]) -> BTreeSet<SqlFeature> {
    features.iter().copied().collect()
}

pub fn compare(
    left: &SchemaDescription,
    right: &SchemaDescription,
    ignores: &BTreeSet<SqlFeature>,
) -> SchemaDiff {
    diff_at(left, right, ignores, fixed_time())
}

/// Every subset of the ignorable features.
pub fn all_ignore_sets() -> Vec<BTreeSet<SqlFeature>> {
    (0..1u8 << SqlFeature::ALL.len())
        .map(|mask| {
            SqlFeature::ALL
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, feature)| *feature)
                .collect()
        })
        .collect()
}

/// `SHOW CREATE TABLE` output of a typical application table.
pub const ORDERS: &str = "CREATE TABLE `orders` (
  `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT COMMENT 'order id',
  `user_id` bigint(20) NOT NULL,
  `status` enum('new','paid','shipped') NOT NULL DEFAULT 'new' COMMENT 'state',
  `amount` decimal(10,2) NOT NULL DEFAULT '0.00',
  `note` varchar(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin DEFAULT NULL,
  `created_at` datetime(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
  `updated_at` timestamp NULL DEFAULT NULL ON UPDATE CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_user_created` (`user_id`,`created_at`),
  KEY `idx_status` (`status`) USING BTREE COMMENT 'status lookup',
  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=804 DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_general_ci COMMENT='orders' ROW_FORMAT=DYNAMIC";

/// `SHOW CREATE TABLE` output of a small lookup table.
pub const USERS: &str = "CREATE TABLE `users` (
  `id` bigint(20) NOT NULL AUTO_INCREMENT,
  `email` varchar(255) NOT NULL COMMENT 'contact',
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_email` (`email`)
) ENGINE=InnoDB AUTO_INCREMENT=12 DEFAULT CHARSET=utf8mb4";
