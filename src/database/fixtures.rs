//! In-memory databases populated for tests.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::connection::{create_memory_pool, get_connection, DbPool};
use super::models::{Competitor, Ranking};
use super::setup::apply_schema;

pub fn insert_competitor(conn: &Connection, competitor: &Competitor) -> Result<()> {
    let sql = "INSERT INTO competitors (competitor_id, name, country) VALUES (?1, ?2, ?3)";

    conn.execute(
        sql,
        params![competitor.competitor_id, competitor.name, competitor.country],
    )
    .context("Failed to insert competitor")
    .map(|_| ())
}

pub fn insert_ranking(conn: &Connection, ranking: &Ranking) -> Result<()> {
    let sql = "INSERT INTO competitor_rankings (competitor_id, rank, points, movement, competitions_played) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(
        sql,
        params![
            ranking.competitor_id,
            ranking.rank,
            ranking.points,
            ranking.movement,
            ranking.competitions_played
        ],
    )
    .context("Failed to insert ranking")
    .map(|_| ())
}

pub fn seeded_pool(competitors: &[Competitor], rankings: &[Ranking]) -> Result<DbPool> {
    let pool = create_memory_pool()?;
    {
        let conn = get_connection(&pool)?;
        apply_schema(&conn)?;
        for competitor in competitors {
            insert_competitor(&conn, competitor)?;
        }
        for ranking in rankings {
            insert_ranking(&conn, ranking)?;
        }
    }
    Ok(pool)
}

/// Ana (FR, rank 2, 500 points) and Bo (US, rank 1, 800 points).
pub fn two_competitor_pool() -> DbPool {
    seeded_pool(
        &[Competitor::new(1, "Ana", "FR"), Competitor::new(2, "Bo", "US")],
        &[Ranking::new(1, 2, 500), Ranking::new(2, 1, 800)],
    )
    .unwrap()
}

/// Eight ranked competitors over four countries, plus one competitor with no
/// ranking row.
pub fn league_pool() -> DbPool {
    let competitors = [
        Competitor::new(1, "Ana Ivanovic", "Serbia"),
        Competitor::new(2, "Novak Djokovic", "Serbia"),
        Competitor::new(3, "Iga Swiatek", "Poland"),
        Competitor::new(4, "Hubert Hurkacz", "Poland"),
        Competitor::new(5, "Carlos Alcaraz", "Spain"),
        Competitor::new(6, "Rafael Nadal", "Spain"),
        Competitor::new(7, "Paula Badosa", "Spain"),
        Competitor::new(8, "Coco Gauff", "USA"),
        Competitor::new(9, "Unranked_Player 100%", "Atlantis"),
    ];
    let rankings = [
        Ranking { movement: -1, competitions_played: 18, ..Ranking::new(1, 40, 1200) },
        Ranking { movement: 0, competitions_played: 20, ..Ranking::new(2, 1, 9800) },
        Ranking { movement: 2, competitions_played: 19, ..Ranking::new(3, 2, 9200) },
        Ranking { movement: -3, competitions_played: 22, ..Ranking::new(4, 12, 3100) },
        Ranking { movement: 1, competitions_played: 17, ..Ranking::new(5, 3, 8900) },
        Ranking { movement: -10, competitions_played: 6, ..Ranking::new(6, 85, 700) },
        Ranking { movement: 4, competitions_played: 21, ..Ranking::new(7, 14, 2700) },
        Ranking { movement: 0, competitions_played: 23, ..Ranking::new(8, 4, 6400) },
    ];
    seeded_pool(&competitors, &rankings).unwrap()
}
