use crate::catalog::{all_sample_courses, sample_courses, AgeGroup};

pub fn handle(age: Option<u32>) -> anyhow::Result<()> {
    let courses = match age {
        Some(age) => {
            let group = AgeGroup::for_age(age)
                .ok_or_else(|| anyhow::anyhow!("age {} does not map to an age group", age))?;
            sample_courses(group)
        }
        None => all_sample_courses(),
    };

    println!("{}", serde_json::to_string_pretty(&courses)?);
    Ok(())
}
