use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_top_programs, ScoreWeights, TopProgramsRequest};
    use crate::table::{ProgramRecord, ProgramTable};

    #[test]
    fn test_render_ranked_programs() {
        let table = ProgramTable::from_records(vec![ProgramRecord {
            field: "Math".to_string(),
            region: "CA".to_string(),
            title: "Topology".to_string(),
            rank: Some(1.0),
            tuition: Some(0.0),
            stipend: Some(30000.0),
            ..Default::default()
        }]);
        let ranked = compute_top_programs(
            &table,
            &TopProgramsRequest::new("Math", ScoreWeights::default(), 5),
        );

        let json = render_json(&ranked).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["candidates"], 1);
        assert_eq!(value["programs"][0]["record"]["title"], "Topology");
        assert_eq!(value["programs"][0]["record"]["region"], "CA");
        assert_eq!(value["warnings"][0]["kind"], "degenerate_range");
    }
}
