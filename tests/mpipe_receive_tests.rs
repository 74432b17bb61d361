use mpipe::checksum::Crc16;
use mpipe::constants::ACK_STATUS_NACK;
use mpipe::frame::{Frame, FrameCodec};
use mpipe::link::{LinkCommand, LinkEvent, ScriptedLink};
use mpipe::mpipe::{Mpipe, MpipePriority, MpipeSignal, MpipeState};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

fn wire_frame(payload: &[u8], sequence: u16) -> Vec<u8> {
    let frame = Frame::data(payload).expect("frame build failed");
    FrameCodec::encode_complete(&frame, sequence, &Crc16).expect("encode failed")
}

/// Flushes the acknowledgment the pipe just armed for sending.
fn flush_ack(pipe: &mut Mpipe<'_, ScriptedLink>) {
    assert_eq!(pipe.current_state(), MpipeState::TxAckWait);

    pipe.on_bulk_complete();
    assert!(pipe.link().send_interrupt_enabled());
    assert_eq!(pipe.current_state(), MpipeState::TxAckWait);

    pipe.on_transfer_finished();
    assert_eq!(pipe.current_state(), MpipeState::TxAckDone);

    pipe.on_transfer_finished();
}

#[test]
fn receive_arms_prefix_and_stays_idle() {
    let mut pipe = Mpipe::new(ScriptedLink::new());
    pipe.link_mut().take_commands();

    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");

    assert_eq!(pipe.current_state(), MpipeState::Idle);
    assert!(!pipe.is_idle());
    assert_eq!(
        pipe.link().commands(),
        &[LinkCommand::Receive(10), LinkCommand::Open]
    );
}

#[test]
fn valid_frame_is_acknowledged_and_delivered() {
    let detected = Rc::new(RefCell::new(Vec::new()));
    let received = Rc::new(RefCell::new(Vec::new()));

    let mut pipe = Mpipe::new(ScriptedLink::new());
    {
        let detected = detected.clone();
        pipe.set_signal(MpipeSignal::ReceiveDetected, move |bytes: &[u8]| {
            detected.borrow_mut().push(bytes.to_vec());
        });
        let received = received.clone();
        pipe.set_signal(MpipeSignal::ReceiveComplete, move |bytes: &[u8]| {
            received.borrow_mut().push(bytes.to_vec());
        });
    }

    let frame = wire_frame(b"hello", 7);
    pipe.link_mut().push_inbound(&frame);

    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");

    pipe.on_bulk_complete();
    assert_eq!(pipe.current_state(), MpipeState::RxPayload);
    assert_eq!(pipe.link().last_receive_length(), Some(5));
    assert_eq!(detected.borrow().as_slice(), &[frame[..10].to_vec()]);

    pipe.on_bulk_complete();
    assert_eq!(pipe.sequence(), 7);

    let ack = pipe.link().sent_frames().pop().expect("no ack sent");
    assert_eq!(ack.len(), 10);
    assert_eq!(&ack[..6], &[0xDD, 0, 0, 2, 0, 0]);
    assert_eq!(FrameCodec::footer_sequence(&ack), Ok(7));
    assert!(FrameCodec::decode(&ack, &Crc16).is_ok());

    flush_ack(&mut pipe);

    assert_eq!(pipe.current_state(), MpipeState::Idle);
    assert!(pipe.is_idle());
    assert!(!pipe.link().is_open());
    assert_eq!(received.borrow().as_slice(), &[frame.clone()]);
    assert_eq!(pipe.take_buffer(), Some(frame));
}

#[test]
fn zero_payload_frame_needs_no_second_read() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    let frame = wire_frame(&[], 3);
    assert_eq!(frame.len(), 10);
    pipe.link_mut().push_inbound(&frame);

    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");
    pipe.link_mut().take_commands();

    pipe.on_bulk_complete();

    assert_eq!(pipe.current_state(), MpipeState::TxAckWait);
    assert_eq!(pipe.link().last_receive_length(), None);
    assert_eq!(pipe.pending_frame(), frame.as_slice());
    assert_eq!(pipe.ack_frame()[5], 0);
}

#[test]
fn payload_bytes_inside_prefix_are_not_overwritten() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    let payload: Vec<u8> = (1..=20).collect();
    let frame = wire_frame(&payload, 0x0102);
    pipe.link_mut().push_inbound(&frame);

    pipe.receive(Vec::new(), false, MpipePriority::Broadcast)
        .expect("receive failed");
    pipe.on_bulk_complete();
    assert_eq!(pipe.link().last_receive_length(), Some(20));
    pipe.on_bulk_complete();

    assert_eq!(pipe.current_state(), MpipeState::Idle);
    assert_eq!(pipe.link().inbound_len(), 0);

    let decoded = FrameCodec::decode(pipe.pending_frame(), &Crc16).expect("decode failed");
    assert_eq!(decoded.payload, payload);
    assert_eq!(decoded.sequence, 0x0102);
}

#[test]
fn corrupted_frame_is_nacked_and_relistened() {
    let detected = Rc::new(RefCell::new(0usize));

    let mut pipe = Mpipe::new(ScriptedLink::new());
    {
        let detected = detected.clone();
        pipe.set_signal(MpipeSignal::ReceiveDetected, move |_: &[u8]| {
            *detected.borrow_mut() += 1;
        });
    }

    let frame = wire_frame(b"payload", 9);

    // Flip one bit anywhere but the payload length field.
    let mut rng = rand::rng();
    let mut corrupted = frame.clone();
    let byte = loop {
        let byte = rng.random_range(0..corrupted.len());
        if byte != 2 {
            break byte;
        }
    };
    corrupted[byte] ^= 1 << rng.random_range(0..8);

    pipe.link_mut().push_inbound(&corrupted);
    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");

    pipe.on_bulk_complete();
    pipe.on_bulk_complete();

    let ack = pipe.link().sent_frames().pop().expect("no ack sent");
    assert_eq!(ack[5], ACK_STATUS_NACK);

    flush_ack(&mut pipe);

    assert_eq!(pipe.current_state(), MpipeState::RxHeader);
    assert_eq!(pipe.link().last_receive_length(), Some(10));
    assert!(!pipe.link().send_interrupt_enabled());

    // The sender's retransmission arrives intact.
    pipe.link_mut().push_inbound(&frame);
    pipe.on_bulk_complete();
    assert_eq!(pipe.current_state(), MpipeState::RxPayload);
    pipe.on_bulk_complete();

    let ack = pipe.link().sent_frames().pop().expect("no ack sent");
    assert_eq!(ack[5], 0);

    flush_ack(&mut pipe);

    assert_eq!(pipe.current_state(), MpipeState::Idle);
    assert_eq!(pipe.pending_frame(), frame.as_slice());
    assert_eq!(pipe.sequence(), 9);
    assert_eq!(*detected.borrow(), 1);
}

#[test]
fn broadcast_receive_sends_no_ack() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    let frame = wire_frame(b"all", 1);
    pipe.link_mut().push_inbound(&frame);

    pipe.receive(Vec::new(), false, MpipePriority::Broadcast)
        .expect("receive failed");
    pipe.on_bulk_complete();
    pipe.on_bulk_complete();

    assert_eq!(pipe.current_state(), MpipeState::Idle);
    assert!(pipe.link().sent_frames().is_empty());
    assert_eq!(pipe.priority(), MpipePriority::Low);
    assert_eq!(pipe.sequence(), 0);
}

#[test]
fn receiver_sequence_wraps_on_next_send() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    pipe.link_mut().push_inbound(&wire_frame(b"z", u16::MAX));
    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");
    pipe.on_bulk_complete();
    pipe.on_bulk_complete();
    flush_ack(&mut pipe);
    assert_eq!(pipe.sequence(), u16::MAX);

    let buffer = FrameCodec::encode(&Frame::data(b"reply").expect("frame build failed"))
        .expect("encode failed");
    pipe.send(buffer, false, MpipePriority::Broadcast)
        .expect("send failed");
    pipe.on_bulk_complete();
    pipe.on_transfer_finished();
    pipe.on_transfer_finished();

    assert_eq!(pipe.sequence(), 0);
}

#[test]
fn blocking_receive_returns_after_cycle() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    pipe.link_mut().push_inbound(&wire_frame(b"block", 4));
    pipe.link_mut().push_events([
        LinkEvent::BulkComplete,
        LinkEvent::BulkComplete,
        LinkEvent::BulkComplete,
        LinkEvent::TransferFinished,
        LinkEvent::TransferFinished,
    ]);

    pipe.receive(Vec::new(), true, MpipePriority::Low)
        .expect("receive failed");

    assert!(pipe.is_idle());
    assert_eq!(pipe.sequence(), 4);

    let buffer = pipe.take_buffer().expect("buffer not returned");
    let decoded = FrameCodec::decode(&buffer, &Crc16).expect("decode failed");
    assert_eq!(decoded.payload, b"block");
}

#[test]
fn send_preempts_a_listening_pipe() {
    let mut pipe = Mpipe::new(ScriptedLink::new());

    pipe.receive(Vec::new(), false, MpipePriority::Low)
        .expect("receive failed");

    let buffer = FrameCodec::encode(&Frame::data(b"first").expect("frame build failed"))
        .expect("encode failed");
    pipe.send(buffer, false, MpipePriority::Low)
        .expect("send failed");

    assert_eq!(pipe.current_state(), MpipeState::TxWait);
}
