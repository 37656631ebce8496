//! Maximum-weight one-to-one assignment (Hungarian method, O(n²·m)).

/// Assigns rows to columns maximizing total weight. Returns the assigned
/// column for each row; with more rows than columns some rows stay `None`.
///
/// Every row/column pair is a candidate, so callers exclude ineligible pairs by
/// giving them weight 0 and discarding those assignments afterwards.
pub fn max_weight_assignment(weights: &[Vec<f64>]) -> Vec<Option<usize>> {
    let rows = weights.len();
    let cols = weights.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return vec![None; rows];
    }

    if rows > cols {
        let transposed: Vec<Vec<f64>> = (0..cols)
            .map(|c| (0..rows).map(|r| weights[r][c]).collect())
            .collect();
        let mut by_row = vec![None; rows];
        for (col, row) in max_weight_assignment(&transposed).into_iter().enumerate() {
            if let Some(row) = row {
                by_row[row] = Some(col);
            }
        }
        return by_row;
    }

    // Minimize negated weights. Indices are 1-based; 0 is the virtual start column.
    let cost = |r: usize, c: usize| -weights[r - 1][c - 1];
    let mut u = vec![0.0; rows + 1];
    let mut v = vec![0.0; cols + 1];
    let mut owner = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for row in 1..=rows {
        owner[0] = row;
        let mut col0 = 0;
        let mut min_slack = vec![f64::INFINITY; cols + 1];
        let mut used = vec![false; cols + 1];

        loop {
            used[col0] = true;
            let row0 = owner[col0];
            let mut delta = f64::INFINITY;
            let mut col1 = 0;

            for col in 1..=cols {
                if used[col] {
                    continue;
                }
                let slack = cost(row0, col) - u[row0] - v[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }

            for col in 0..=cols {
                if used[col] {
                    u[owner[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }

            col0 = col1;
            if owner[col0] == 0 {
                break;
            }
        }

        loop {
            let prev = way[col0];
            owner[col0] = owner[prev];
            col0 = prev;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut by_row = vec![None; rows];
    for col in 1..=cols {
        if owner[col] != 0 {
            by_row[owner[col] - 1] = Some(col - 1);
        }
    }
    by_row
}
