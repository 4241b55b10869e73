//! Offset pagination shared by the task and attendance reports.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ReportError, ReportResult};

/// One page of rows and the total the server reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: usize,
}

/// Fetch pages from offset 0 until the rows collected reach the total
/// reported by the first page, or a page comes back short.
///
/// Any page error aborts the whole fetch and drops what was collected.
/// With a `cancel` token each page request is raced against it.
pub async fn paginate<T, F, Fut>(
    page_size: usize,
    cancel: Option<&CancellationToken>,
    mut fetch_page: F,
) -> ReportResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ReportResult<Page<T>>>,
{
    let page_size = page_size.max(1);
    let mut skip = 0;
    let mut rows: Vec<T> = Vec::new();
    let mut total: Option<usize> = None;

    loop {
        let page = match cancel {
            Some(token) => {
                if token.is_cancelled() {
                    return Err(ReportError::Cancelled);
                }
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(ReportError::Cancelled),
                    page = fetch_page(skip) => page?,
                }
            }
            None => fetch_page(skip).await?,
        };

        let total = *total.get_or_insert(page.total);
        let fetched = page.rows.len();
        rows.extend(page.rows);
        log::debug!("Fetched page skip={} rows={} ({}/{})", skip, fetched, rows.len(), total);

        skip += page_size;
        if rows.len() >= total || fetched < page_size {
            break;
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn pages(sizes: &[usize], total: usize) -> Vec<Page<u32>> {
        sizes
            .iter()
            .map(|n| Page { rows: vec![0; *n], total })
            .collect()
    }

    async fn run(script: Vec<Page<u32>>, page_size: usize) -> (ReportResult<Vec<u32>>, Vec<usize>) {
        let script = RefCell::new(script.into_iter());
        let offsets = RefCell::new(Vec::new());
        let result = paginate(page_size, None, |skip| {
            offsets.borrow_mut().push(skip);
            let next = script.borrow_mut().next();
            async move { next.ok_or(ReportError::Transport("script exhausted".into())) }
        })
        .await;
        (result, offsets.into_inner())
    }

    #[tokio::test]
    async fn test_stops_when_total_reached() {
        let (rows, offsets) = run(pages(&[100, 100, 50], 250), 100).await;
        assert_eq!(rows.unwrap().len(), 250);
        assert_eq!(offsets, vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_stops_on_full_page_matching_total() {
        let (rows, offsets) = run(pages(&[100, 100], 200), 100).await;
        assert_eq!(rows.unwrap().len(), 200);
        assert_eq!(offsets, vec![0, 100]);
    }

    #[tokio::test]
    async fn test_short_page_stops_even_below_total() {
        let (rows, offsets) = run(pages(&[50, 20], 500), 50).await;
        assert_eq!(rows.unwrap().len(), 70);
        assert_eq!(offsets, vec![0, 50]);
    }

    #[tokio::test]
    async fn test_total_taken_from_first_page_only() {
        let script = vec![
            Page { rows: vec![0; 10], total: 20 },
            Page { rows: vec![0; 10], total: 1000 },
        ];
        let (rows, offsets) = run(script, 10).await;
        assert_eq!(rows.unwrap().len(), 20);
        assert_eq!(offsets.len(), 2);
    }

    #[tokio::test]
    async fn test_error_discards_collected_rows() {
        let (rows, offsets) = run(pages(&[10], 100), 10).await;
        assert!(matches!(rows, Err(ReportError::Transport(_))));
        assert_eq!(offsets, vec![0, 10]);
    }

    #[tokio::test]
    async fn test_cancelled_token_issues_no_request() {
        let token = CancellationToken::new();
        token.cancel();
        let calls = RefCell::new(0);
        let result: ReportResult<Vec<u32>> = paginate(10, Some(&token), |_| {
            *calls.borrow_mut() += 1;
            async { Ok(Page { rows: vec![], total: 0 }) }
        })
        .await;
        assert_eq!(result, Err(ReportError::Cancelled));
        assert_eq!(*calls.borrow(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_first_page_drops_it() {
        let token = CancellationToken::new();
        let offsets = RefCell::new(Vec::new());
        let result: ReportResult<Vec<u32>> = paginate(10, Some(&token), |skip| {
            offsets.borrow_mut().push(skip);
            token.cancel();
            async { Ok(Page { rows: vec![0; 10], total: 30 }) }
        })
        .await;
        assert_eq!(result, Err(ReportError::Cancelled));
        assert_eq!(offsets.into_inner(), vec![0]);
    }

    #[tokio::test]
    async fn test_cancel_while_second_page_pending() {
        let token = CancellationToken::new();
        let offsets = RefCell::new(Vec::new());
        let result: ReportResult<Vec<u32>> = paginate(10, Some(&token), |skip| {
            offsets.borrow_mut().push(skip);
            let token = token.clone();
            async move {
                if skip > 0 {
                    token.cancel();
                    std::future::pending::<()>().await;
                }
                Ok(Page { rows: vec![0; 10], total: 30 })
            }
        })
        .await;
        assert_eq!(result, Err(ReportError::Cancelled));
        assert_eq!(offsets.into_inner(), vec![0, 10]);
    }
}
