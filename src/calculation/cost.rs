//! Shift cost and payroll projection.
//!
//! Hourly staff cost `rate × hours` per shift, where the rate is the
//! employee's override for the shift's area or their default rate. Salaried
//! staff cost nothing per shift; their monthly figure is counted once in the
//! fixed part of the projection.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{
    CalculationWarning, Employee, EmployeeCostLine, FinancialSummary, OperationalCost,
    PayrollProjection, RoleCost, Shift, WarningSeverity,
};

use super::filter::EmployeeIndex;
use super::time_interval::{DurationPolicy, duration_hours};

/// Weeks-per-month factor used to scale weekly cost to a month.
pub const DEFAULT_WEEKS_PER_MONTH: Decimal = Decimal::from_parts(45, 0, 0, false, 1);

/// Label used in role breakdowns for employees without a role.
pub const NO_ROLE: &str = "(no role)";

/// Warning code for a shift whose employee does not exist.
pub const WARN_UNRESOLVED_EMPLOYEE: &str = "UNRESOLVED_EMPLOYEE";
/// Warning code for an hourly shift with no applicable rate.
pub const WARN_MISSING_RATE: &str = "MISSING_RATE";
/// Warning code for a salaried employee with no monthly figure.
pub const WARN_MISSING_SALARY: &str = "MISSING_SALARY";
/// Warning code for a shift with malformed times.
pub const WARN_INVALID_TIME: &str = "INVALID_TIME";
/// Warning code for a shift that ends before it starts.
pub const WARN_NEGATIVE_DURATION: &str = "NEGATIVE_DURATION";

/// The knobs that shape a payroll projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Factor applied to weekly variable cost.
    pub weeks_per_month: Decimal,
    /// Count salaried staff even when they have no shift assigned.
    pub include_unassigned_salaried: bool,
    /// How shift durations are measured.
    pub duration_policy: DurationPolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            weeks_per_month: DEFAULT_WEEKS_PER_MONTH,
            include_unassigned_salaried: false,
            duration_policy: DurationPolicy::default(),
        }
    }
}

/// Cost of one shift together with any data gap found while pricing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCostResult {
    /// Hours counted for the shift.
    pub hours: Decimal,
    /// Cost of the shift (always zero for salaried staff).
    pub cost: Decimal,
    /// Set when the shift was priced at zero because of missing or bad data.
    pub warning: Option<CalculationWarning>,
}

/// Prices one shift and reports why a cost came out zero, if it did.
pub fn assess_shift_cost(
    employee: &Employee,
    shift: &Shift,
    policy: DurationPolicy,
) -> ShiftCostResult {
    let duration = match duration_hours(&shift.start, &shift.end, policy) {
        Ok(duration) => duration,
        Err(err) => {
            return ShiftCostResult {
                hours: Decimal::ZERO,
                cost: Decimal::ZERO,
                warning: Some(
                    CalculationWarning::new(WARN_INVALID_TIME, err.to_string(), WarningSeverity::High)
                        .for_shift(&shift.id)
                        .for_employee(&employee.id),
                ),
            };
        }
    };

    let clamp_warning = duration.clamped.then(|| {
        CalculationWarning::new(
            WARN_NEGATIVE_DURATION,
            format!(
                "Shift {} ends ({}) before it starts ({}); counted as 0 hours",
                shift.id, shift.end, shift.start
            ),
            WarningSeverity::Medium,
        )
        .for_shift(&shift.id)
        .for_employee(&employee.id)
    });

    if employee.is_salaried() {
        return ShiftCostResult {
            hours: duration.hours,
            cost: Decimal::ZERO,
            warning: clamp_warning,
        };
    }

    match employee.hourly_rate_for(&shift.area) {
        Some(rate) => ShiftCostResult {
            hours: duration.hours,
            cost: rate * duration.hours,
            warning: clamp_warning,
        },
        None => ShiftCostResult {
            hours: duration.hours,
            cost: Decimal::ZERO,
            warning: Some(
                CalculationWarning::new(
                    WARN_MISSING_RATE,
                    format!(
                        "Employee {} has no hourly rate for area '{}'",
                        employee.name, shift.area
                    ),
                    WarningSeverity::High,
                )
                .for_shift(&shift.id)
                .for_employee(&employee.id),
            ),
        },
    }
}

/// Monetary cost of one shift.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{shift_cost, DurationPolicy};
/// use roster_engine::models::{Employee, Shift};
/// use rust_decimal::Decimal;
///
/// let ana: Employee = serde_json::from_str(
///     r#"{"id": "ana", "name": "Ana", "type": "hourly", "value": 20}"#,
/// ).unwrap();
/// let shift: Shift = serde_json::from_str(
///     r#"{"employee_id": "ana", "day": "monday", "start": "06:00", "end": "12:00", "area": "Musculação"}"#,
/// ).unwrap();
///
/// assert_eq!(shift_cost(&ana, &shift, DurationPolicy::HourTruncated), Decimal::from(120));
/// ```
pub fn shift_cost(employee: &Employee, shift: &Shift, policy: DurationPolicy) -> Decimal {
    assess_shift_cost(employee, shift, policy).cost
}

fn assigned_ids(shifts: &[Shift]) -> HashSet<&str> {
    shifts.iter().map(|s| s.employee_id.as_str()).collect()
}

/// Sum of monthly figures for salaried staff.
///
/// Only employees with at least one shift count unless
/// `include_unassigned` is set. `cost_real` takes precedence over `value`.
pub fn fixed_monthly_cost(employees: &[Employee], shifts: &[Shift], include_unassigned: bool) -> Decimal {
    let assigned = assigned_ids(shifts);
    employees
        .iter()
        .filter(|e| e.is_salaried())
        .filter(|e| include_unassigned || assigned.contains(e.id.as_str()))
        .filter_map(|e| e.monthly_cost())
        .sum()
}

/// Sum of shift costs over the week. Shifts of unknown employees cost zero.
pub fn weekly_variable_cost(employees: &[Employee], shifts: &[Shift], policy: DurationPolicy) -> Decimal {
    let index = EmployeeIndex::new(employees);
    shifts
        .iter()
        .filter_map(|shift| index.get(&shift.employee_id).map(|e| shift_cost(e, shift, policy)))
        .sum()
}

/// Scales a weekly cost to a month.
pub fn monthly_variable_cost(weekly: Decimal, weeks_per_month: Decimal) -> Decimal {
    weekly * weeks_per_month
}

/// Builds the full payroll projection.
///
/// The per-employee lines cover everyone counted in payroll: employees with
/// at least one shift, plus every salaried employee when unassigned salaried
/// staff are included. Lines follow the order of `employees`.
pub fn project_payroll(
    employees: &[Employee],
    shifts: &[Shift],
    policy: &PayrollPolicy,
) -> PayrollProjection {
    let index = EmployeeIndex::new(employees);
    let mut warnings = Vec::new();
    let mut per_employee: BTreeMap<&str, (usize, Decimal, Decimal)> = BTreeMap::new();

    for shift in shifts {
        let Some(employee) = index.get(&shift.employee_id) else {
            warnings.push(
                CalculationWarning::new(
                    WARN_UNRESOLVED_EMPLOYEE,
                    format!(
                        "Shift {} references unknown employee '{}'; counted as 0",
                        shift.id, shift.employee_id
                    ),
                    WarningSeverity::High,
                )
                .for_shift(&shift.id)
                .for_employee(&shift.employee_id),
            );
            continue;
        };

        let assessed = assess_shift_cost(employee, shift, policy.duration_policy);
        if let Some(warning) = assessed.warning {
            warnings.push(warning);
        }
        let entry = per_employee
            .entry(employee.id.as_str())
            .or_insert((0, Decimal::ZERO, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += assessed.hours;
        entry.2 += assessed.cost;
    }

    let mut fixed = Decimal::ZERO;
    let mut weekly = Decimal::ZERO;
    let mut lines = Vec::new();

    for employee in employees {
        let scheduled = per_employee.get(employee.id.as_str()).copied();
        let counted = scheduled.is_some() || (employee.is_salaried() && policy.include_unassigned_salaried);
        if !counted {
            continue;
        }
        let (shift_count, weekly_hours, weekly_cost) =
            scheduled.unwrap_or((0, Decimal::ZERO, Decimal::ZERO));

        let monthly_cost = if employee.is_salaried() {
            match employee.monthly_cost() {
                Some(salary) => salary,
                None => {
                    warnings.push(
                        CalculationWarning::new(
                            WARN_MISSING_SALARY,
                            format!("Salaried employee {} has no monthly value", employee.name),
                            WarningSeverity::High,
                        )
                        .for_employee(&employee.id),
                    );
                    Decimal::ZERO
                }
            }
        } else {
            monthly_variable_cost(weekly_cost, policy.weeks_per_month)
        };

        if employee.is_salaried() {
            fixed += monthly_cost;
        } else {
            weekly += weekly_cost;
        }

        lines.push(EmployeeCostLine {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            role: employee.role.clone(),
            contract_type: employee.contract_type,
            shift_count,
            weekly_hours,
            weekly_cost,
            monthly_cost,
        });
    }

    let monthly_variable = monthly_variable_cost(weekly, policy.weeks_per_month);

    PayrollProjection {
        fixed_monthly_cost: fixed,
        weekly_variable_cost: weekly,
        monthly_variable_cost: monthly_variable,
        total_monthly_cost: fixed + monthly_variable,
        weeks_per_month: policy.weeks_per_month,
        lines,
        warnings,
    }
}

/// Groups the projection's monthly cost by role, sorted by role name.
pub fn costs_by_role(projection: &PayrollProjection) -> Vec<RoleCost> {
    let mut by_role: BTreeMap<&str, Decimal> = BTreeMap::new();
    for line in &projection.lines {
        let role = if line.role.trim().is_empty() {
            NO_ROLE
        } else {
            line.role.as_str()
        };
        *by_role.entry(role).or_insert(Decimal::ZERO) += line.monthly_cost;
    }
    by_role
        .into_iter()
        .map(|(role, monthly_cost)| RoleCost {
            role: role.to_string(),
            monthly_cost,
        })
        .collect()
}

/// Customers needed at `ticket_price` to cover `total_cost`, rounded up.
///
/// Returns `None` when the ticket price is zero or negative.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::break_even_customers;
/// use rust_decimal::Decimal;
///
/// assert_eq!(break_even_customers(Decimal::from(1000), Decimal::from(120)), Some(9));
/// assert_eq!(break_even_customers(Decimal::from(1000), Decimal::ZERO), None);
/// ```
pub fn break_even_customers(total_cost: Decimal, ticket_price: Decimal) -> Option<u64> {
    if ticket_price <= Decimal::ZERO {
        return None;
    }
    if total_cost <= Decimal::ZERO {
        return Some(0);
    }
    (total_cost / ticket_price).ceil().to_u64()
}

/// Combines the payroll projection with operational costs.
pub fn financial_summary(
    projection: &PayrollProjection,
    operational_costs: &[OperationalCost],
    ticket_price: Decimal,
) -> FinancialSummary {
    let operational: Decimal = operational_costs.iter().map(|c| c.value).sum();
    let total = projection.total_monthly_cost + operational;

    FinancialSummary {
        personnel_monthly_cost: projection.total_monthly_cost,
        operational_monthly_cost: operational,
        total_monthly_cost: total,
        ticket_price,
        break_even_customers: break_even_customers(total, ticket_price),
        by_role: costs_by_role(projection),
        operational_costs: operational_costs.to_vec(),
        warnings: projection.warnings.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractType, Weekday};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_employee(id: &str, contract_type: ContractType, value: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_string(),
            role: "Instrutor".to_string(),
            contract_type,
            value: value.map(dec),
            cost_real: None,
            values_by_area: BTreeMap::new(),
            active: true,
            admission_date: None,
            exit_date: None,
            phone: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn make_shift(id: &str, employee_id: &str, start: &str, end: &str, area: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            day: Weekday::Monday,
            start: start.to_string(),
            end: end.to_string(),
            area: area.to_string(),
        }
    }

    fn ana_and_bia() -> (Vec<Employee>, Vec<Shift>) {
        let ana = make_employee("ana", ContractType::Hourly, Some("20"));
        let mut bia = make_employee("bia", ContractType::Hourly, None);
        bia.values_by_area.insert("Musculação".to_string(), dec("25"));
        let shifts = vec![
            make_shift("s1", "ana", "06:00", "12:00", "Musculação"),
            make_shift("s2", "bia", "08:00", "10:00", "Musculação"),
        ];
        (vec![ana, bia], shifts)
    }

    #[test]
    fn test_hourly_without_override_uses_default_rate() {
        let employee = make_employee("e1", ContractType::Hourly, Some("20"));
        let shift = make_shift("s1", "e1", "08:00", "17:00", "Funcional");
        assert_eq!(
            shift_cost(&employee, &shift, DurationPolicy::HourTruncated),
            dec("180")
        );
    }

    #[test]
    fn test_salaried_shift_costs_zero() {
        let employee = make_employee("e1", ContractType::MonthlySalaried, Some("3000"));
        let shift = make_shift("s1", "e1", "06:00", "22:00", "Recepção");
        let assessed = assess_shift_cost(&employee, &shift, DurationPolicy::HourTruncated);
        assert_eq!(assessed.cost, Decimal::ZERO);
        assert_eq!(assessed.hours, dec("16"));
        assert!(assessed.warning.is_none());
    }

    #[test]
    fn test_missing_rate_costs_zero_with_warning() {
        let employee = make_employee("e1", ContractType::Hourly, None);
        let shift = make_shift("s1", "e1", "06:00", "08:00", "Funcional");
        let assessed = assess_shift_cost(&employee, &shift, DurationPolicy::HourTruncated);
        assert_eq!(assessed.cost, Decimal::ZERO);
        assert_eq!(assessed.warning.unwrap().code, WARN_MISSING_RATE);
    }

    #[test]
    fn test_invalid_time_costs_zero_with_warning() {
        let employee = make_employee("e1", ContractType::Hourly, Some("20"));
        let shift = make_shift("s1", "e1", "??", "08:00", "Funcional");
        let assessed = assess_shift_cost(&employee, &shift, DurationPolicy::HourTruncated);
        assert_eq!(assessed.cost, Decimal::ZERO);
        assert_eq!(assessed.warning.unwrap().code, WARN_INVALID_TIME);
    }

    #[test]
    fn test_overnight_is_clamped_and_flagged() {
        let employee = make_employee("e1", ContractType::Hourly, Some("20"));
        let shift = make_shift("s1", "e1", "22:00", "02:00", "Recepção");
        let assessed = assess_shift_cost(&employee, &shift, DurationPolicy::HourTruncated);
        assert_eq!(assessed.cost, Decimal::ZERO);
        assert_eq!(assessed.warning.unwrap().code, WARN_NEGATIVE_DURATION);

        let minute = assess_shift_cost(&employee, &shift, DurationPolicy::MinutePrecision);
        assert_eq!(minute.cost, dec("80"));
        assert!(minute.warning.is_none());
    }

    #[test]
    fn test_ana_and_bia_weekly_and_monthly() {
        let (employees, shifts) = ana_and_bia();
        let weekly = weekly_variable_cost(&employees, &shifts, DurationPolicy::HourTruncated);
        assert_eq!(weekly, dec("170"));
        assert_eq!(
            monthly_variable_cost(weekly, DEFAULT_WEEKS_PER_MONTH),
            dec("765")
        );
    }

    #[test]
    fn test_unassigned_salaried_excluded_by_default() {
        let carla = make_employee("carla", ContractType::MonthlySalaried, Some("3000"));
        assert_eq!(fixed_monthly_cost(&[carla.clone()], &[], false), Decimal::ZERO);
        assert_eq!(fixed_monthly_cost(&[carla], &[], true), dec("3000"));
    }

    #[test]
    fn test_cost_real_takes_precedence() {
        let mut carlos = make_employee("carlos", ContractType::MonthlySalaried, Some("3000"));
        carlos.cost_real = Some(dec("4200"));
        let shifts = vec![make_shift("s1", "carlos", "06:00", "14:00", "Recepção")];
        assert_eq!(fixed_monthly_cost(&[carlos], &shifts, false), dec("4200"));
    }

    #[test]
    fn test_unknown_employee_costs_zero() {
        let (employees, mut shifts) = ana_and_bia();
        shifts.push(make_shift("s3", "ghost", "06:00", "22:00", "Musculação"));
        assert_eq!(
            weekly_variable_cost(&employees, &shifts, DurationPolicy::HourTruncated),
            dec("170")
        );
    }

    #[test]
    fn test_projection_totals_and_lines() {
        let (mut employees, mut shifts) = ana_and_bia();
        let mut carlos = make_employee("carlos", ContractType::MonthlySalaried, Some("3000"));
        carlos.cost_real = Some(dec("4200"));
        employees.push(carlos);
        employees.push(make_employee("idle", ContractType::MonthlySalaried, Some("2500")));
        shifts.push(make_shift("s3", "carlos", "06:00", "14:00", "Recepção"));

        let projection = project_payroll(&employees, &shifts, &PayrollPolicy::default());

        assert_eq!(projection.fixed_monthly_cost, dec("4200"));
        assert_eq!(projection.weekly_variable_cost, dec("170"));
        assert_eq!(projection.monthly_variable_cost, dec("765"));
        assert_eq!(projection.total_monthly_cost, dec("4965"));
        assert!(projection.warnings.is_empty());

        let names: Vec<&str> = projection.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "bia", "carlos"]);
        assert_eq!(projection.lines[0].weekly_hours, dec("6"));
        assert_eq!(projection.lines[0].monthly_cost, dec("540"));
        assert_eq!(projection.lines[2].weekly_cost, Decimal::ZERO);
        assert_eq!(projection.lines[2].shift_count, 1);
    }

    #[test]
    fn test_projection_can_include_unassigned_salaried() {
        let employees = vec![make_employee("idle", ContractType::MonthlySalaried, Some("2500"))];
        let policy = PayrollPolicy {
            include_unassigned_salaried: true,
            ..PayrollPolicy::default()
        };
        let projection = project_payroll(&employees, &[], &policy);
        assert_eq!(projection.fixed_monthly_cost, dec("2500"));
        assert_eq!(projection.lines.len(), 1);
        assert_eq!(projection.lines[0].shift_count, 0);
    }

    #[test]
    fn test_projection_flags_unresolved_and_missing_salary() {
        let employees = vec![make_employee("boss", ContractType::MonthlySalaried, None)];
        let shifts = vec![
            make_shift("s1", "boss", "08:00", "12:00", "Recepção"),
            make_shift("s2", "ghost", "08:00", "12:00", "Recepção"),
        ];
        let projection = project_payroll(&employees, &shifts, &PayrollPolicy::default());
        let codes: Vec<&str> = projection.warnings.iter().map(|w| w.code.as_str()).collect();
        assert_eq!(codes, vec![WARN_UNRESOLVED_EMPLOYEE, WARN_MISSING_SALARY]);
        assert_eq!(projection.total_monthly_cost, Decimal::ZERO);
    }

    #[test]
    fn test_costs_by_role_groups_and_sorts() {
        let (mut employees, shifts) = ana_and_bia();
        employees[1].role = "Recepção".to_string();
        let projection = project_payroll(&employees, &shifts, &PayrollPolicy::default());
        let by_role = costs_by_role(&projection);
        assert_eq!(by_role.len(), 2);
        assert_eq!(by_role[0].role, "Instrutor");
        assert_eq!(by_role[0].monthly_cost, dec("540"));
        assert_eq!(by_role[1].role, "Recepção");
        assert_eq!(by_role[1].monthly_cost, dec("225"));
    }

    #[test]
    fn test_break_even_guards() {
        assert_eq!(break_even_customers(dec("1200"), dec("120")), Some(10));
        assert_eq!(break_even_customers(dec("1201"), dec("120")), Some(11));
        assert_eq!(break_even_customers(dec("0"), dec("120")), Some(0));
        assert_eq!(break_even_customers(dec("1200"), dec("0")), None);
        assert_eq!(break_even_customers(dec("1200"), dec("-5")), None);
    }

    #[test]
    fn test_financial_summary_adds_operational_costs() {
        let (employees, shifts) = ana_and_bia();
        let projection = project_payroll(&employees, &shifts, &PayrollPolicy::default());
        let costs = vec![
            OperationalCost {
                id: "c1".to_string(),
                name: "Aluguel".to_string(),
                value: dec("1000"),
            },
            OperationalCost {
                id: "c2".to_string(),
                name: "Contador".to_string(),
                value: dec("435"),
            },
        ];
        let summary = financial_summary(&projection, &costs, dec("120"));
        assert_eq!(summary.personnel_monthly_cost, dec("765"));
        assert_eq!(summary.operational_monthly_cost, dec("1435"));
        assert_eq!(summary.total_monthly_cost, dec("2200"));
        assert_eq!(summary.break_even_customers, Some(19));
    }
}
