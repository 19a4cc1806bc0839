use sea_query::{Expr, MysqlQueryBuilder, Query, SqliteQueryBuilder};

use crate::schema::{Part, PartRecord};

/// INSERT INTO <part> (start_time) VALUES (?)
pub fn insert_start(part: Part, start_time: f64) -> String {
    Query::insert()
        .into_table(part.table())
        .columns([PartRecord::StartTime])
        .values_panic([start_time.into()])
        .to_string(SqliteQueryBuilder)
}

/// INSERT INTO <part> (start_time) VALUES (?) - MySQL
pub fn insert_start_mysql(part: Part, start_time: f64) -> String {
    Query::insert()
        .into_table(part.table())
        .columns([PartRecord::StartTime])
        .values_panic([start_time.into()])
        .to_string(MysqlQueryBuilder)
}

/// SELECT speechace_json FROM <part> WHERE id = ?
pub fn select_result(part: Part, id: i64) -> String {
    Query::select()
        .column(PartRecord::SpeechaceJson)
        .from(part.table())
        .and_where(Expr::col(PartRecord::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

/// SELECT speechace_json FROM <part> WHERE id = ? - MySQL
pub fn select_result_mysql(part: Part, id: i64) -> String {
    Query::select()
        .column(PartRecord::SpeechaceJson)
        .from(part.table())
        .and_where(Expr::col(PartRecord::Id).eq(id))
        .to_string(MysqlQueryBuilder)
}

/// UPDATE <part> SET video_link = ?, audio_link = ?, upload_time = ?,
///     speechace_json = ? WHERE id = ?
pub fn update_upload(
    part: Part,
    id: i64,
    video_link: &str,
    audio_link: &str,
    upload_time: f64,
    speechace_json: &str,
) -> String {
    Query::update()
        .table(part.table())
        .value(PartRecord::VideoLink, video_link)
        .value(PartRecord::AudioLink, audio_link)
        .value(PartRecord::UploadTime, upload_time)
        .value(PartRecord::SpeechaceJson, speechace_json)
        .and_where(Expr::col(PartRecord::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

/// UPDATE <part> SET video_link = ?, audio_link = ?, upload_time = ?,
///     speechace_json = ? WHERE id = ? - MySQL
pub fn update_upload_mysql(
    part: Part,
    id: i64,
    video_link: &str,
    audio_link: &str,
    upload_time: f64,
    speechace_json: &str,
) -> String {
    Query::update()
        .table(part.table())
        .value(PartRecord::VideoLink, video_link)
        .value(PartRecord::AudioLink, audio_link)
        .value(PartRecord::UploadTime, upload_time)
        .value(PartRecord::SpeechaceJson, speechace_json)
        .and_where(Expr::col(PartRecord::Id).eq(id))
        .to_string(MysqlQueryBuilder)
}
