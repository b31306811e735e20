//! Population and institution generation

use crate::core::config::Tuning;
use crate::core::rng::SimRng;
use crate::core::types::{AgentId, InstitutionId, Vec2};
use crate::entity::{Agent, Institution, ValueDimension, ValueProfile};
use crate::simulation::config::{InstitutionDef, ValueSettings};

fn random_position(rng: &mut SimRng) -> Vec2 {
    let x = rng.next_f64();
    let y = rng.next_f64();
    Vec2::new(x, y)
}

/// Spawn `count` agents with uniform positions, values and budgets
///
/// Positions are drawn for the whole population first, then each agent's
/// raw values, money budget and communication strength. Every agent starts
/// due for reoptimization on the first step.
pub fn spawn_agents(
    count: usize,
    tuning: &Tuning,
    reallocation_frequency: u32,
    rng: &mut SimRng,
) -> Vec<Agent> {
    let positions: Vec<Vec2> = (0..count).map(|_| random_position(rng)).collect();
    let (money_low, money_high) = tuning.money_budget_range;
    let (comm_low, comm_high) = tuning.comm_strength_range;

    positions
        .into_iter()
        .zip(0u32..)
        .map(|(position, id)| {
            let mut values = ValueProfile::default();
            for dimension in ValueDimension::ALL {
                values.set(dimension, rng.next_f64());
            }
            let money_budget = rng.uniform(money_low, money_high);
            let comm_strength = rng.uniform(comm_low, comm_high);

            let mut agent = Agent::new(
                AgentId(id),
                position,
                values,
                tuning.time_budget,
                money_budget,
                comm_strength,
            );
            agent.steps_since_change = reallocation_frequency;
            agent
        })
        .collect()
}

/// Overlay configured normal distributions onto agents' values, clamped to [0, 1]
pub fn apply_value_settings(agents: &mut [Agent], settings: &ValueSettings, rng: &mut SimRng) {
    for agent in agents.iter_mut() {
        for dimension in ValueDimension::ALL {
            if let Some(setting) = settings.get(dimension) {
                let sample = rng.normal(setting.mean, setting.spread);
                agent.values.set(dimension, sample.clamp(0.0, 1.0));
            }
        }
    }
}

/// Create one institution per definition at a random position
pub fn build_institutions(defs: &[InstitutionDef], rng: &mut SimRng) -> Vec<Institution> {
    defs.iter()
        .zip(0u32..)
        .map(|(def, id)| Institution {
            id: InstitutionId(id),
            key: def.key(),
            name: def.name.clone(),
            practice_type: def.practice_type,
            capacity: def.capacity,
            members: Default::default(),
            culture: def.culture,
            money_cost_per_hour: def.money_cost_per_hour,
            money_income_per_hour: def.money_income_per_hour,
            position: random_position(rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::PracticeType;
    use crate::simulation::config::ValueSetting;

    #[test]
    fn test_spawned_agents_are_in_range() {
        let mut rng = SimRng::new(42);
        let tuning = Tuning::default();
        let agents = spawn_agents(50, &tuning, 4, &mut rng);

        assert_eq!(agents.len(), 50);
        for (i, agent) in agents.iter().enumerate() {
            assert_eq!(agent.id, AgentId(i as u32));
            assert!((0.0..1.0).contains(&agent.position.x));
            assert!((0.0..1.0).contains(&agent.position.y));
            assert!(agent.values.within(0.0, 1.0));
            assert!((500.0..2000.0).contains(&agent.money_budget));
            assert!((0.5..1.0).contains(&agent.comm_strength));
            assert_eq!(agent.time_budget, 168.0);
            assert_eq!(agent.steps_since_change, 4);
        }
    }

    #[test]
    fn test_value_settings_clamp_to_unit_interval() {
        let mut rng = SimRng::new(9);
        let mut agents = spawn_agents(200, &Tuning::default(), 1, &mut rng);
        // A huge spread pushes most samples outside [0, 1] before clamping
        let settings = ValueSettings::uniform(0.5, 5.0);
        apply_value_settings(&mut agents, &settings, &mut rng);

        assert!(agents.iter().all(|a| a.values.within(0.0, 1.0)));
        assert!(agents.iter().any(|a| a.values.community == 0.0));
        assert!(agents.iter().any(|a| a.values.community == 1.0));
    }

    #[test]
    fn test_zero_spread_pins_value_to_mean() {
        let mut rng = SimRng::new(5);
        let mut agents = spawn_agents(10, &Tuning::default(), 1, &mut rng);
        let mut settings = ValueSettings::raw();
        settings.set(ValueDimension::Wealth, Some(ValueSetting::new(0.8, 0.0)));
        let before: Vec<f64> = agents.iter().map(|a| a.values.growth).collect();

        apply_value_settings(&mut agents, &settings, &mut rng);

        assert!(agents.iter().all(|a| (a.values.wealth - 0.8).abs() < 1e-12));
        let after: Vec<f64> = agents.iter().map(|a| a.values.growth).collect();
        assert_eq!(before, after, "unset dimensions keep raw draws");
    }

    #[test]
    fn test_institutions_follow_definitions() {
        let mut rng = SimRng::new(1);
        let defs = vec![
            InstitutionDef::new("Steel  Mill", PracticeType::Work, 40).with_income(25.0),
            InstitutionDef::new("Chess", PracticeType::Club, 10).with_cost(5.0),
        ];
        let institutions = build_institutions(&defs, &mut rng);

        assert_eq!(institutions.len(), 2);
        assert_eq!(institutions[0].key, "work_Steel_Mill");
        assert_eq!(institutions[0].id, InstitutionId(0));
        assert_eq!(institutions[1].money_cost_per_hour, 5.0);
        assert!(institutions.iter().all(|i| i.members.is_empty()));
    }
}
