#[derive(Debug, Clone)]
pub struct Competitor {
    pub competitor_id: i64,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub competitor_id: i64,
    pub rank: i64,
    pub points: i64,
    pub movement: i64,
    pub competitions_played: i64,
}

impl Competitor {
    pub fn new(competitor_id: i64, name: &str, country: &str) -> Self {
        Self {
            competitor_id,
            name: name.to_string(),
            country: country.to_string(),
        }
    }
}

impl Ranking {
    pub fn new(competitor_id: i64, rank: i64, points: i64) -> Self {
        Self {
            competitor_id,
            rank,
            points,
            movement: 0,
            competitions_played: 0,
        }
    }
}
