//! Vote signature aggregation.

use berth_primitives::vote::Vote;

/// Concatenates vote signatures in input order.
///
/// No dedup and no verification, both happen upstream in the consensus
/// layer. An empty vote set yields empty output, which callers must treat as
/// insufficient votes.
pub fn aggregate_signatures(votes: &[Vote]) -> Vec<u8> {
    let mut agg = Vec::with_capacity(votes.len() * 64);
    for vote in votes {
        agg.extend_from_slice(vote.signature().as_slice());
    }
    agg
}

/// Canonical payload the block's votes were signed over.
///
/// Every vote in one block signs the same bytes, so the first vote's copy is
/// what gets forwarded to the bridge.
pub fn vote_sign_bytes(votes: &[Vote]) -> Option<&[u8]> {
    votes.first().map(|v| v.sign_bytes())
}

#[cfg(test)]
mod tests {
    use berth_primitives::buf::Buf64;

    use super::*;

    fn vote(fill: u8) -> Vote {
        Vote::new(Buf64::from([fill; 64]), vec![fill; 8])
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_signatures(&[]).is_empty());
        assert!(vote_sign_bytes(&[]).is_none());
    }

    #[test]
    fn test_aggregate_length_is_sum_of_signatures() {
        let votes = vec![vote(1), vote(2), vote(3)];
        let agg = aggregate_signatures(&votes);
        assert_eq!(agg.len(), 3 * 64);
    }

    #[test]
    fn test_aggregate_preserves_order() {
        let votes = vec![vote(1), vote(2)];
        let agg = aggregate_signatures(&votes);
        assert_eq!(&agg[..64], [1u8; 64].as_slice());
        assert_eq!(&agg[64..], [2u8; 64].as_slice());

        // reordering input reorders output, no normalization
        let reversed = vec![vote(2), vote(1)];
        let agg_rev = aggregate_signatures(&reversed);
        assert_ne!(agg, agg_rev);
        assert_eq!(&agg_rev[..64], [2u8; 64].as_slice());
    }

    #[test]
    fn test_sign_bytes_come_from_first_vote() {
        let votes = vec![vote(7), vote(9)];
        assert_eq!(vote_sign_bytes(&votes), Some([7u8; 8].as_slice()));
    }
}
