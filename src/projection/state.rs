//! Month-by-month balance state for savings and debt trajectories

/// Savings balance at the end of a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsState {
    /// Months elapsed (0 = opening position)
    pub period: u32,

    /// Balance after this month's contribution and growth
    pub balance: f64,

    /// Cumulative contributions, excluding the opening balance
    pub contributed: f64,
}

impl SavingsState {
    pub fn opening(balance: f64) -> Self {
        Self {
            period: 0,
            balance,
            contributed: 0.0,
        }
    }

    /// Advance one month: contribution first, then growth
    pub fn advance_month(&mut self, contribution: f64, monthly_rate: f64) {
        self.period += 1;
        self.balance += contribution;
        self.contributed += contribution;
        if monthly_rate > 0.0 {
            self.balance *= 1.0 + monthly_rate;
        }
    }
}

/// Unbounded savings trajectory; yields the state after each month.
/// Callers bound it with `take` or their own stop condition.
#[derive(Debug, Clone)]
pub struct SavingsTrajectory {
    state: SavingsState,
    contribution: f64,
    monthly_rate: f64,
}

impl SavingsTrajectory {
    pub fn new(opening_balance: f64, contribution: f64, monthly_rate: f64) -> Self {
        Self {
            state: SavingsState::opening(opening_balance),
            contribution,
            monthly_rate,
        }
    }
}

impl Iterator for SavingsTrajectory {
    type Item = SavingsState;

    fn next(&mut self) -> Option<SavingsState> {
        self.state.advance_month(self.contribution, self.monthly_rate);
        Some(self.state)
    }
}

/// Debt balance at the end of a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtState {
    pub period: u32,
    pub balance: f64,

    /// Interest accrued in the latest month
    pub interest: f64,

    /// Amount disbursed in the latest month
    pub payment: f64,

    pub total_interest: f64,
    pub total_paid: f64,
}

impl DebtState {
    pub fn opening(principal: f64) -> Self {
        Self {
            period: 0,
            balance: principal,
            interest: 0.0,
            payment: 0.0,
            total_interest: 0.0,
            total_paid: 0.0,
        }
    }

    /// Advance one month: accrue interest, then pay up to the remaining balance
    pub fn advance_month(&mut self, scheduled_payment: f64, monthly_rate: f64) {
        self.period += 1;

        self.interest = self.balance * monthly_rate;
        self.balance += self.interest;

        self.payment = scheduled_payment.min(self.balance);
        self.balance -= self.payment;

        self.total_interest += self.interest;
        self.total_paid += self.payment;
    }
}

/// Unbounded amortization trajectory; yields the state after each month
#[derive(Debug, Clone)]
pub struct DebtTrajectory {
    state: DebtState,
    payment: f64,
    monthly_rate: f64,
}

impl DebtTrajectory {
    pub fn new(principal: f64, payment: f64, monthly_rate: f64) -> Self {
        Self {
            state: DebtState::opening(principal),
            payment,
            monthly_rate,
        }
    }
}

impl Iterator for DebtTrajectory {
    type Item = DebtState;

    fn next(&mut self) -> Option<DebtState> {
        self.state.advance_month(self.payment, self.monthly_rate);
        Some(self.state)
    }
}
