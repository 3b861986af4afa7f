use super::scoring::ScoredSupplier;

/// 数量比较容差
pub(super) const QTY_EPSILON: f64 = 1e-6;

// ==========================================
// 单一供应商数量
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SingleQuantity {
    pub qty: f64,
    pub moq_adjustment: f64, // 因起订量多订
    pub shortfall: f64,      // 合同上限未覆盖的需求量
}

/// qty = max(target, moq),再按合同上限截断
///
/// # 参数
/// - target: 下单目标（可能已被 EOQ 上调）
/// - need: 必须覆盖的需求量（含安全库存）,缺口只按它计算
pub(super) fn single_quantity(candidate: &ScoredSupplier, target: f64, need: f64) -> SingleQuantity {
    let moq = candidate.supplier.effective_moq();
    let raised = target.max(moq);
    let qty = raised.min(candidate.supplier.capacity());

    SingleQuantity {
        qty,
        moq_adjustment: (qty - target).max(0.0),
        shortfall: (need - qty).max(0.0),
    }
}

// ==========================================
// 按比例分配 + 合同上限注水
// ==========================================

/// 按权重比例分配 total,超过上限的部分重新分给其余未封顶者
///
/// 权重全为 0 时按均分处理
pub(super) fn water_fill(weights: &[f64], caps: &[f64], total: f64) -> Vec<f64> {
    let n = weights.len();
    let mut shares = vec![0.0; n];
    let mut open: Vec<usize> = (0..n).collect();
    let mut remaining = total;

    while remaining > QTY_EPSILON && !open.is_empty() {
        let weight_sum: f64 = open.iter().map(|&i| weights[i].max(0.0)).sum();
        let weight_of = |i: usize| {
            if weight_sum > 0.0 {
                weights[i].max(0.0) / weight_sum
            } else {
                1.0 / open.len() as f64
            }
        };

        let capped: Vec<usize> = open
            .iter()
            .copied()
            .filter(|&i| remaining * weight_of(i) > caps[i] + QTY_EPSILON)
            .collect();

        if capped.is_empty() {
            for &i in &open {
                shares[i] = remaining * weight_of(i);
            }
            remaining = 0.0;
            break;
        }

        for &i in &capped {
            shares[i] = caps[i];
            remaining -= caps[i];
        }
        open.retain(|i| !capped.contains(i));
    }

    shares
}

// ==========================================
// 多供应商拆分
// ==========================================

#[derive(Debug, Clone, PartialEq)]
pub(super) enum SplitPlan {
    /// 仅剩一家供应商,按单一供应商规则下单
    Single {
        index: usize,
        quantity: SingleQuantity,
    },
    /// 多家拆分: (ranked 下标, 数量),按排名排列
    Split {
        shares: Vec<(usize, f64)>,
        shortfall: f64,
    },
}

/// 拆分过程中被剔除的供应商
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DroppedShare {
    pub index: usize,
    pub share: f64,
    pub moq: f64,
}

/// 多供应商拆分
///
/// 1) 取排名前 max_suppliers 家,按评分比例分配,合同上限注水
/// 2) 份额低于起订量者,从排名最低者开始剔除并重新分配
/// 3) 上限导致需求量未覆盖,且未达家数上限时,补入下一家未使用的供应商
/// 4) 只剩一家时退化为单一供应商规则
///
/// 按 target 分配; 补入供应商与缺口只看 need（EOQ 上调部分被上限截掉不算缺口）
pub(super) fn plan_split(
    ranked: &[ScoredSupplier],
    target: f64,
    need: f64,
    max_suppliers: usize,
) -> (SplitPlan, Vec<DroppedShare>) {
    let limit = max_suppliers.max(1);
    let mut active: Vec<usize> = (0..ranked.len().min(limit)).collect();
    let mut next_candidate = active.len();
    let mut dropped = Vec::new();

    loop {
        if active.len() == 1 {
            let index = active[0];
            let quantity = single_quantity(&ranked[index], target, need);
            if quantity.shortfall > QTY_EPSILON
                && active.len() < limit
                && next_candidate < ranked.len()
            {
                active.push(next_candidate);
                next_candidate += 1;
                continue;
            }
            return (SplitPlan::Single { index, quantity }, dropped);
        }

        let weights: Vec<f64> = active.iter().map(|&i| ranked[i].score).collect();
        let caps: Vec<f64> = active.iter().map(|&i| ranked[i].supplier.capacity()).collect();
        let shares = water_fill(&weights, &caps, target);

        // 从排名最低者开始检查起订量
        let below_moq = (0..active.len()).rev().find(|&pos| {
            shares[pos] + QTY_EPSILON < ranked[active[pos]].supplier.effective_moq()
        });
        if let Some(pos) = below_moq {
            let index = active.remove(pos);
            dropped.push(DroppedShare {
                index,
                share: shares[pos],
                moq: ranked[index].supplier.effective_moq(),
            });
            continue;
        }

        let allocated: f64 = shares.iter().sum();
        let uncovered = (need - allocated).max(0.0);
        if uncovered > QTY_EPSILON && active.len() < limit && next_candidate < ranked.len() {
            active.push(next_candidate);
            next_candidate += 1;
            continue;
        }

        let plan = SplitPlan::Split {
            shares: active.iter().copied().zip(shares).collect(),
            shortfall: if uncovered > QTY_EPSILON { uncovered } else { 0.0 },
        };
        return (plan, dropped);
    }
}
