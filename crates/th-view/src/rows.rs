use th_core::entities::{
    Animal, ClimateLog, FeedingLog, HousingContainer, HousingSlot, SpeciesType, WeightLog,
};

use crate::grouping::genotype_signature;
use crate::table::TableRow;

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl TableRow for SpeciesType {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => non_empty(&self.name),
            _ => None,
        }
    }
}

impl TableRow for Animal {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => non_empty(&self.name),
            "nickname" => self.nickname.clone(),
            "sex" => self.sex.map(|sex| sex.as_str().to_string()),
            "species_id" => Some(self.species_id.clone()),
            "container_id" => self.container_id.clone(),
            "slot_id" => self.slot_id.clone(),
            "signature" => Some(genotype_signature(&self.traits)),
            _ => None,
        }
    }
}

impl TableRow for HousingContainer {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => non_empty(&self.name),
            "kind" => Some(self.kind.as_str().to_string()),
            _ => None,
        }
    }
}

impl TableRow for HousingSlot {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "container_id" => Some(self.container_id.clone()),
            "column" => Some(self.column.to_string()),
            "row" => Some(self.row.to_string()),
            _ => None,
        }
    }
}

macro_rules! impl_log_row {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TableRow for $ty {
                fn row_id(&self) -> &str {
                    &self.id
                }

                fn field_value(&self, field: &str) -> Option<String> {
                    match field {
                        "id" => Some(self.id.clone()),
                        "animal_id" => Some(self.animal_id.clone()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_log_row!(FeedingLog, WeightLog, ClimateLog);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::test_fixtures::animal;
    use crate::table::{Filter, FilterValue, apply_filters};
    use th_core::enums::Sex;

    #[test]
    fn animal_fields_cover_table_filters() {
        let mut snake = animal("ani-1", "spc-1", "雪蛇", &["条纹", "白化"], Some(Sex::ProbableFemale));
        snake.container_id = Some("hsg-1".into());

        assert_eq!(snake.field_value("sex").as_deref(), Some("probable_female"));
        assert_eq!(snake.field_value("container_id").as_deref(), Some("hsg-1"));
        assert_eq!(snake.field_value("slot_id"), None);
        assert_eq!(snake.field_value("nickname"), None);
        assert_eq!(
            snake.field_value("signature"),
            Some(genotype_signature(&snake.traits))
        );
        assert_eq!(snake.field_value("weight"), None);
    }

    #[test]
    fn unrecognized_sex_never_matches_a_sex_filter() {
        let rows = vec![
            animal("ani-1", "spc-1", "雪蛇", &[], Some(Sex::Male)),
            animal("ani-2", "spc-1", "雪蛇", &[], None),
        ];
        let filters = [Filter::field("sex", FilterValue::parse("male"))];
        let ids: Vec<_> = apply_filters(&rows, &filters).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ani-1"]);
    }

    #[test]
    fn blank_name_reads_as_missing() {
        let blank = animal("ani-1", "spc-1", "", &[], None);
        assert_eq!(blank.field_value("name"), None);
        assert_eq!(blank.row_id(), "ani-1");
    }
}
