use serde::Deserialize;

/// One row of the street sweeping schedule CSV
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeedRow {
    #[serde(rename = "CNN")]
    pub cnn: String,
    #[serde(rename = "Corridor")]
    pub corridor: String,
    #[serde(rename = "Limits")]
    pub limits: String,
    #[serde(rename = "CNNRightLeft")]
    pub cnn_right_left: String,
    #[serde(rename = "BlockSide")]
    pub block_side: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "WeekDay")]
    pub week_day: String,
    #[serde(rename = "FromHour")]
    pub from_hour: String,
    #[serde(rename = "ToHour")]
    pub to_hour: String,
    #[serde(rename = "Week1")]
    pub week1: String,
    #[serde(rename = "Week2")]
    pub week2: String,
    #[serde(rename = "Week3")]
    pub week3: String,
    #[serde(rename = "Week4")]
    pub week4: String,
    #[serde(rename = "Week5")]
    pub week5: String,
    #[serde(rename = "Holidays")]
    pub holidays: String,
    #[serde(rename = "BlockSweepID")]
    pub block_sweep_id: String,
    #[serde(rename = "Line")]
    pub line: String,
}

impl FeedRow {
    pub fn week_flags(&self) -> [bool; 5] {
        [
            &self.week1,
            &self.week2,
            &self.week3,
            &self.week4,
            &self.week5,
        ]
        .map(|flag| is_set(flag))
    }

    pub fn holiday(&self) -> bool {
        is_set(&self.holidays)
    }
}

fn is_set(flag: &str) -> bool {
    flag.trim() == "1"
}
