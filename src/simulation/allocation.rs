//! Utility model and greedy time allocation

use std::collections::BTreeMap;

use crate::core::config::Tuning;
use crate::core::types::InstitutionId;
use crate::entity::{Agent, Institution};

/// Utility `agent` gets from `hours` per week at `institution`
///
/// Value benefits grow with `hours^(1 / exponent)`. The money term is linear
/// and scaled by how much the agent cares about wealth: a gain for work, a
/// cost for everything else.
pub fn institution_utility(agent: &Agent, institution: &Institution, hours: f64, tuning: &Tuning) -> f64 {
    if hours <= 0.0 {
        return 0.0;
    }

    let profile = institution.practice_type.profile();
    let effective_hours = hours.powf(1.0 / profile.diminishing_returns);
    let benefit = profile.benefits.dot(&agent.values) * effective_hours;

    let money_weight = hours * agent.values.wealth * tuning.money_utility_scale;
    if institution.practice_type.is_work() {
        benefit + money_weight * institution.money_income_per_hour
    } else {
        benefit - money_weight * institution.money_cost_per_hour
    }
}

/// Utility of one more hour on top of `current_hours`
pub fn marginal_utility(agent: &Agent, institution: &Institution, current_hours: f64, tuning: &Tuning) -> f64 {
    institution_utility(agent, institution, current_hours + 1.0, tuning)
        - institution_utility(agent, institution, current_hours, tuning)
}

/// Hand out the agent's week one hour at a time
///
/// Each hour goes to the aware institution with the greatest marginal
/// utility, skipping institutions at their practice's hour cap and non-work
/// institutions the running money balance cannot cover for another hour.
/// Every allocated hour moves the balance by the institution's income minus
/// its cost, whatever its practice.
/// Ties go to the lowest institution id. Allocation stops once the best
/// marginal utility no longer exceeds `utility_epsilon`; unspent hours are
/// free time.
///
/// This is a greedy hill-climb and does not guarantee the global optimum.
/// Entries below `min_allocation_hours` are dropped from the result.
pub fn optimize_allocation(
    agent: &Agent,
    institutions: &[Institution],
    tuning: &Tuning,
) -> BTreeMap<InstitutionId, f64> {
    let candidates: Vec<&Institution> = agent
        .aware_of
        .iter()
        .filter_map(|id| institutions.get(id.index()))
        .collect();
    let mut hours = vec![0.0_f64; candidates.len()];

    let mut balance = agent.money_budget;
    let mut time_left = agent.time_budget;
    let max_iterations = agent.time_budget.max(0.0) as usize;

    for _ in 0..max_iterations {
        if time_left <= 0.0 {
            break;
        }

        let mut best: Option<(usize, f64)> = None;
        for (slot, institution) in candidates.iter().enumerate() {
            let current = hours[slot];
            if current >= institution.practice_type.profile().hour_cap {
                continue;
            }
            if !institution.practice_type.is_work() && balance - institution.money_cost_per_hour < 0.0 {
                continue;
            }

            let gain = marginal_utility(agent, institution, current, tuning);
            if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((slot, gain));
            }
        }

        let Some((slot, gain)) = best else {
            break;
        };
        if gain <= tuning.utility_epsilon {
            break;
        }

        let institution = candidates[slot];
        hours[slot] += 1.0;
        time_left -= 1.0;
        balance += institution.money_income_per_hour - institution.money_cost_per_hour;
    }

    candidates
        .iter()
        .zip(hours)
        .filter(|(_, h)| *h >= tuning.min_allocation_hours)
        .map(|(institution, h)| (institution.id, h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Vec2};
    use crate::entity::{PracticeType, ValueProfile};

    fn agent_with(values: ValueProfile, money: f64, aware: &[u32]) -> Agent {
        let mut agent = Agent::new(AgentId(0), Vec2::default(), values, 168.0, money, 0.8);
        agent.aware_of.extend(aware.iter().map(|&i| InstitutionId(i)));
        agent
    }

    fn institution(id: u32, practice: PracticeType, cost: f64, income: f64) -> Institution {
        Institution {
            id: InstitutionId(id),
            key: format!("{}_{}", practice, id),
            name: id.to_string(),
            practice_type: practice,
            capacity: 100,
            members: Default::default(),
            culture: ValueProfile::default(),
            money_cost_per_hour: cost,
            money_income_per_hour: income,
            position: Vec2::default(),
        }
    }

    #[test]
    fn test_utility_is_zero_without_hours() {
        let agent = agent_with(ValueProfile::splat(1.0), 1000.0, &[]);
        let church = institution(0, PracticeType::Church, 0.0, 0.0);
        assert_eq!(institution_utility(&agent, &church, 0.0, &Tuning::default()), 0.0);
        assert_eq!(institution_utility(&agent, &church, -3.0, &Tuning::default()), 0.0);
    }

    #[test]
    fn test_utility_has_diminishing_returns() {
        let agent = agent_with(ValueProfile::splat(0.8), 1000.0, &[]);
        let church = institution(0, PracticeType::Church, 0.0, 0.0);
        let tuning = Tuning::default();

        let first = marginal_utility(&agent, &church, 0.0, &tuning);
        let tenth = marginal_utility(&agent, &church, 9.0, &tuning);
        assert!(first > tenth);
        assert!(tenth > 0.0);
    }

    #[test]
    fn test_money_term_signs() {
        let mut values = ValueProfile::default();
        values.wealth = 1.0;
        let agent = agent_with(values, 1000.0, &[]);
        let tuning = Tuning::default();

        // All benefit weights times zero values: only the money term remains
        let work = institution(0, PracticeType::Work, 0.0, 25.0);
        assert!((institution_utility(&agent, &work, 2.0, &tuning) - 0.5).abs() < 1e-12);

        let club = institution(1, PracticeType::Club, 5.0, 0.0);
        assert!((institution_utility(&agent, &club, 2.0, &tuning) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_work_only_allocation_is_bounded_by_cap() {
        let mut values = ValueProfile::splat(0.5);
        values.wealth = 1.0;
        let agent = agent_with(values, 1000.0, &[0]);
        let institutions = vec![institution(0, PracticeType::Work, 0.0, 25.0)];

        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        let hours = allocation.get(&InstitutionId(0)).copied().unwrap_or(0.0);
        assert!(hours > 0.0);
        assert!(hours <= 60.0);
    }

    #[test]
    fn test_nothing_worthwhile_leaves_free_time() {
        // Zero values: every marginal utility is 0, below epsilon
        let agent = agent_with(ValueProfile::default(), 1000.0, &[0, 1]);
        let institutions = vec![
            institution(0, PracticeType::Church, 0.0, 0.0),
            institution(1, PracticeType::Club, 0.0, 0.0),
        ];
        assert!(optimize_allocation(&agent, &institutions, &Tuning::default()).is_empty());
    }

    #[test]
    fn test_unaware_institutions_are_ignored() {
        let agent = agent_with(ValueProfile::splat(1.0), 1000.0, &[1]);
        let institutions = vec![
            institution(0, PracticeType::Church, 0.0, 0.0),
            institution(1, PracticeType::Club, 0.0, 0.0),
        ];
        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        assert!(!allocation.contains_key(&InstitutionId(0)));
        assert!(allocation.contains_key(&InstitutionId(1)));
    }

    #[test]
    fn test_caps_hold_for_every_practice() {
        let agent = agent_with(ValueProfile::splat(1.0), 1_000_000.0, &[0, 1, 2, 3, 4, 5]);
        let institutions: Vec<Institution> = PracticeType::ALL
            .into_iter()
            .zip(0u32..)
            .map(|(practice, id)| institution(id, practice, 0.0, 10.0))
            .collect();

        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        let total: f64 = allocation.values().sum();
        assert!(total <= 168.0);
        for (id, hours) in &allocation {
            let cap = institutions[id.index()].practice_type.profile().hour_cap;
            assert!(*hours <= cap, "{} has {} > {}", id.0, hours, cap);
        }
    }

    #[test]
    fn test_unaffordable_institution_is_skipped() {
        let agent = agent_with(ValueProfile::splat(1.0), 3.0, &[0]);
        let institutions = vec![institution(0, PracticeType::Education, 10.0, 0.0)];
        assert!(optimize_allocation(&agent, &institutions, &Tuning::default()).is_empty());
    }

    #[test]
    fn test_spending_stops_when_balance_runs_out() {
        // Budget covers exactly 4 hours at 2/hour; utility stays above epsilon
        let mut values = ValueProfile::splat(1.0);
        values.wealth = 0.0;
        let agent = agent_with(values, 8.0, &[0]);
        let institutions = vec![institution(0, PracticeType::Church, 2.0, 0.0)];

        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        assert_eq!(allocation.get(&InstitutionId(0)), Some(&4.0));
    }

    #[test]
    fn test_work_income_funds_other_practices() {
        let mut values = ValueProfile::splat(1.0);
        values.wealth = 0.0;
        let agent = agent_with(values, 0.0, &[0, 1]);
        let institutions = vec![
            institution(0, PracticeType::Work, 0.0, 25.0),
            institution(1, PracticeType::Church, 2.0, 0.0),
        ];

        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        assert!(allocation.contains_key(&InstitutionId(0)));
        assert!(allocation.contains_key(&InstitutionId(1)));
    }

    #[test]
    fn test_costly_workplace_drains_balance() {
        let mut values = ValueProfile::default();
        values.status = 1.0;
        let agent = agent_with(values, 100.0, &[0, 1]);
        let institutions = vec![
            institution(0, PracticeType::Work, 100.0, 0.0),
            institution(1, PracticeType::Church, 1.0, 0.0),
        ];

        // Church wins the first hour, then one work hour puts the balance below zero
        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        let church = allocation.get(&InstitutionId(1)).copied().unwrap_or(0.0);
        assert!(church <= 1.0, "church got {} hours", church);
        assert!(allocation.get(&InstitutionId(0)).copied().unwrap_or(0.0) > 0.0);
    }

    #[test]
    fn test_ties_go_to_lowest_id() {
        // Identical clubs: hours alternate, the earlier one never trails
        let agent = agent_with(ValueProfile::splat(0.5), 1000.0, &[0, 1]);
        let institutions = vec![
            institution(0, PracticeType::Club, 0.0, 0.0),
            institution(1, PracticeType::Club, 0.0, 0.0),
        ];
        let allocation = optimize_allocation(&agent, &institutions, &Tuning::default());
        let first = allocation.get(&InstitutionId(0)).copied().unwrap_or(0.0);
        let second = allocation.get(&InstitutionId(1)).copied().unwrap_or(0.0);
        assert!(first >= second);
        assert!(first - second <= 1.0);
    }

    #[test]
    fn test_higher_epsilon_allocates_less() {
        let agent = agent_with(ValueProfile::splat(0.1), 1000.0, &[0]);
        let institutions = vec![institution(0, PracticeType::Education, 0.0, 0.0)];
        let loose = optimize_allocation(&agent, &institutions, &Tuning::default());
        let strict = optimize_allocation(
            &agent,
            &institutions,
            &Tuning {
                utility_epsilon: 0.05,
                ..Tuning::default()
            },
        );
        let hours = |a: &BTreeMap<InstitutionId, f64>| a.values().sum::<f64>();
        assert!(hours(&strict) < hours(&loose));
    }
}
