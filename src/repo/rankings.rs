use rusqlite::params;

use crate::db::models::{FishSpecies, RankingEntry};
use crate::error::AppResult;
use crate::state::DbPool;

/// All known species, ordered by display name. Static reference data.
pub fn list_species(pool: &DbPool) -> AppResult<Vec<FishSpecies>> {
    let conn = pool.get()?;

    let mut stmt = conn.prepare("SELECT id, name, name_ja FROM fish_species ORDER BY name_ja")?;
    let species = stmt
        .query_map([], |row| {
            Ok(FishSpecies {
                id: row.get(0)?,
                name: row.get(1)?,
                name_ja: row.get(2)?,
            })
        })?
        .collect::<Result<_, _>>()?;

    Ok(species)
}

/// Top 100 leaderboard rows for a category/period, optionally filtered by
/// species, rank ascending. The projection is maintained externally; this is
/// strictly a read.
pub fn list_rankings(
    pool: &DbPool,
    category: &str,
    period: &str,
    species_id: Option<i64>,
) -> AppResult<Vec<RankingEntry>> {
    let conn = pool.get()?;

    let entries = match species_id {
        Some(species_id) => {
            let mut stmt = conn.prepare(&ranking_sql(true))?;
            let entries = stmt
                .query_map(params![category, period, species_id], map_ranking)?
                .collect::<Result<_, _>>()?;
            entries
        }
        None => {
            let mut stmt = conn.prepare(&ranking_sql(false))?;
            let entries = stmt
                .query_map(params![category, period], map_ranking)?
                .collect::<Result<_, _>>()?;
            entries
        }
    };

    Ok(entries)
}

fn ranking_sql(with_species: bool) -> String {
    let mut sql = String::from(
        "SELECT r.id, r.user_id, r.species_id, r.category, r.period, r.rank, r.value,
                u.username, u.display_name, u.avatar_url,
                fs.name_ja AS species_name
         FROM rankings r
         JOIN users u ON u.id = r.user_id
         LEFT JOIN fish_species fs ON fs.id = r.species_id
         WHERE r.category = ?1 AND r.period = ?2",
    );
    if with_species {
        sql.push_str(" AND r.species_id = ?3");
    }
    sql.push_str(" ORDER BY r.rank ASC LIMIT 100");
    sql
}

fn map_ranking(row: &rusqlite::Row) -> rusqlite::Result<RankingEntry> {
    Ok(RankingEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        species_id: row.get(2)?,
        category: row.get(3)?,
        period: row.get(4)?,
        rank: row.get(5)?,
        value: row.get(6)?,
        username: row.get(7)?,
        display_name: row.get(8)?,
        avatar_url: row.get(9)?,
        species_name: row.get(10)?,
    })
}
