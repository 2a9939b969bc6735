/// Source endpoints and field names shared across the crate.
/// `{team}` and `{id}` are substituted when URLs are built.

pub const DEFAULT_ROSTER_URL_TEMPLATE: &str = "https://www.iplt20.com/teams/{team}";
pub const DEFAULT_STATS_URL_TEMPLATE: &str =
    "https://ipl-stats-sports-mechanic.s3.ap-south-1.amazonaws.com/ipl/feeds/stats/player/{id}-playerstats.js";
pub const DEFAULT_REFERER: &str = "https://www.iplt20.com/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

pub const TEAM_PLACEHOLDER: &str = "{team}";
pub const ID_PLACEHOLDER: &str = "{id}";

/// Period label of the career aggregate entry in each series
pub const ALL_TIME_LABEL: &str = "AllTime";

/// IPL franchises scanned when no team list is configured
pub const DEFAULT_TEAMS: [&str; 10] = [
    "chennai-super-kings",
    "mumbai-indians",
    "royal-challengers-bengaluru",
    "kolkata-knight-riders",
    "delhi-capitals",
    "punjab-kings",
    "rajasthan-royals",
    "sunrisers-hyderabad",
    "lucknow-super-giants",
    "gujarat-titans",
];

// Identity columns, present on every row
pub const PLAYER_ID: &str = "Player_ID";
pub const FIRST_NAME: &str = "First_Name";
pub const LAST_NAME: &str = "Last_Name";
pub const FULL_NAME: &str = "Full_Name";

pub const IDENTITY_FIELDS: [&str; 4] = [PLAYER_ID, FIRST_NAME, LAST_NAME, FULL_NAME];

/// (output column, source key) for the batting career aggregate
pub const BATTING_FIELDS: [(&str, &str); 14] = [
    ("Matches", "Matches"),
    ("Innings", "Innings"),
    ("Runs", "Runs"),
    ("Balls_Faced", "Balls"),
    ("Highest_Score", "HighestScore"),
    ("Batting_Average", "BattingAvg"),
    ("Strike_Rate", "StrikeRate"),
    ("Fifties", "Fifties"),
    ("Hundreds", "Hundreds"),
    ("Fours", "Fours"),
    ("Sixes", "Sixes"),
    ("Not_Outs", "NotOuts"),
    ("Catches", "Catches"),
    ("Stumpings", "Stumpings"),
];

/// (output column, source key) for the bowling career aggregate
pub const BOWLING_FIELDS: [(&str, &str); 9] = [
    ("Overs", "Overs"),
    ("Runs_Conceded", "Runs"),
    ("Wickets", "Wickets"),
    ("Bowling_Average", "Average"),
    ("Economy", "Econ"),
    ("Bowling_Strike_Rate", "StrikeRate"),
    ("Best_Bowling", "BBM"),
    ("4_Wickets", "FourWkts"),
    ("5_Wickets", "FiveWkts"),
];

pub const PLAYER_NAME_KEY: &str = "PlayerName";
pub const YEAR_KEY: &str = "Year";

/// Every column a row can carry, in export order.
pub fn all_columns() -> Vec<&'static str> {
    IDENTITY_FIELDS
        .iter()
        .copied()
        .chain(BATTING_FIELDS.iter().map(|(col, _)| *col))
        .chain(BOWLING_FIELDS.iter().map(|(col, _)| *col))
        .collect()
}
