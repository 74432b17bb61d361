use crate::LoopbackLink;
use mpipe::checksum::Checksum;
use mpipe::mpipe::Mpipe;

/// Services both endpoints in turn until neither link has an event left.
///
/// Returns the number of events handled. A pipe that is still waiting when
/// this returns is waiting on bytes that will never arrive.
pub fn pump<C>(a: &mut Mpipe<'_, LoopbackLink, C>, b: &mut Mpipe<'_, LoopbackLink, C>) -> usize
where
    C: Checksum,
{
    let mut handled = 0;

    loop {
        let a_progressed = a.service();
        let b_progressed = b.service();

        if !a_progressed && !b_progressed {
            break;
        }

        handled += usize::from(a_progressed) + usize::from(b_progressed);
    }

    tracing::trace!(
        "Wire quiet after {} events (A {:?}, B {:?})",
        handled,
        a.current_state(),
        b.current_state()
    );

    handled
}
