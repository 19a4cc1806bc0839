use sea_query::{ColumnDef, MysqlQueryBuilder, SqliteQueryBuilder, Table};

use crate::schema::{Part, PartRecord};

/// CREATE TABLE IF NOT EXISTS part_a / part_b (
///     id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
///     start_time DOUBLE NOT NULL,
///     video_link VARCHAR NOT NULL DEFAULT '',
///     audio_link VARCHAR NOT NULL DEFAULT '',
///     upload_time DOUBLE,
///     speechace_json TEXT
/// )
///
/// A row starts with only start_time set; the upload columns are filled in
/// by the single later update.
pub fn create_part_table(part: Part) -> String {
    Table::create()
        .table(part.table())
        .if_not_exists()
        .col(
            ColumnDef::new(PartRecord::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(PartRecord::StartTime).double().not_null())
        .col(
            ColumnDef::new(PartRecord::VideoLink)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(PartRecord::AudioLink)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(PartRecord::UploadTime).double())
        .col(ColumnDef::new(PartRecord::SpeechaceJson).text())
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS part_a / part_b - MySQL
/// Note: Uses AUTO_INCREMENT instead of AUTOINCREMENT
pub fn create_part_table_mysql(part: Part) -> String {
    Table::create()
        .table(part.table())
        .if_not_exists()
        .col(
            ColumnDef::new(PartRecord::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(PartRecord::StartTime).double().not_null())
        .col(
            ColumnDef::new(PartRecord::VideoLink)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(PartRecord::AudioLink)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(PartRecord::UploadTime).double())
        .col(ColumnDef::new(PartRecord::SpeechaceJson).text())
        .to_string(MysqlQueryBuilder)
}
